/// Alternate items from two rankings, starting with `first`
///
/// Once one side runs out the remainder of the other is appended in order.
pub fn interleave<T>(first: Vec<T>, second: Vec<T>) -> Vec<T> {
    let mut merged = Vec::with_capacity(first.len() + second.len());
    let mut first = first.into_iter();
    let mut second = second.into_iter();

    loop {
        match (first.next(), second.next()) {
            (Some(a), Some(b)) => {
                merged.push(a);
                merged.push(b);
            }
            (Some(a), None) => {
                merged.push(a);
                merged.extend(first);
                break;
            }
            (None, Some(b)) => {
                merged.push(b);
                merged.extend(second);
                break;
            }
            (None, None) => break,
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternates() {
        assert_eq!(interleave(vec![1, 3, 5], vec![2, 4, 6]), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_uneven_lengths() {
        assert_eq!(interleave(vec![1, 3, 5, 7], vec![2]), vec![1, 2, 3, 5, 7]);
        assert_eq!(interleave(vec![1], vec![2, 4, 6]), vec![1, 2, 4, 6]);
        assert_eq!(interleave(Vec::<u8>::new(), vec![9]), vec![9]);
    }
}
