use crate::stream::Stream;
use std::cmp::Ordering;

/// Scales every element by `factor`. The result ends before the first product
/// that overflows `u64`, so an ascending input stays ascending.
pub fn multiply(stream: &Stream<u64>, factor: u64) -> Stream<u64> {
    match stream {
        Stream::Node(head, rest) => match head.checked_mul(factor) {
            Some(product) => {
                let rest = rest.clone();
                Stream::cons(product, move || multiply(&rest.force(), factor))
            }
            None => Stream::Empty,
        },
        Stream::Empty => Stream::Empty,
    }
}

/// Sorted union of two strictly ascending streams. Equal heads are emitted once.
///
/// An empty input yields the other input unchanged. Inputs that are not strictly
/// ascending produce an unordered result; this is not checked.
pub fn merge<A: Ord + Clone + 'static>(a: &Stream<A>, b: &Stream<A>) -> Stream<A> {
    match (a, b) {
        (Stream::Empty, _) => b.clone(),
        (_, Stream::Empty) => a.clone(),
        (Stream::Node(head_a, rest_a), Stream::Node(head_b, rest_b)) => {
            match head_a.cmp(head_b) {
                Ordering::Less => {
                    let rest_a = rest_a.clone();
                    let b = b.clone();
                    Stream::cons(head_a.clone(), move || merge(&rest_a.force(), &b))
                }
                Ordering::Greater => {
                    let a = a.clone();
                    let rest_b = rest_b.clone();
                    Stream::cons(head_b.clone(), move || merge(&a, &rest_b.force()))
                }
                Ordering::Equal => {
                    let rest_a = rest_a.clone();
                    let rest_b = rest_b.clone();
                    Stream::cons(head_a.clone(), move || {
                        merge(&rest_a.force(), &rest_b.force())
                    })
                }
            }
        }
    }
}

/// The Hamming numbers: 1, followed by the union of the sequence itself scaled
/// by 2, 3 and 5. Every reference rebuilds the sequence from its head.
pub fn hamming() -> Stream<u64> {
    Stream::cons(1, || {
        merge(
            &multiply(&hamming(), 2),
            &merge(&multiply(&hamming(), 3), &multiply(&hamming(), 5)),
        )
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::R;
    use proptest::prelude::*;

    fn is_hamming_number(mut n: u64) -> bool {
        for &factor in &[2, 3, 5] {
            while n % factor == 0 {
                n /= factor;
            }
        }
        n == 1
    }

    mod hamming {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn starts_with_one() {
            assert_eq!(hamming().take(1).to_vec(), vec![1]);
        }

        #[test]
        fn first_five_terms() {
            assert_eq!(hamming().take(5).to_vec(), vec![1, 2, 3, 4, 5]);
        }

        #[test]
        fn first_twenty_terms() {
            assert_eq!(
                hamming().take(20).to_vec(),
                vec![1, 2, 3, 4, 5, 6, 8, 9, 10, 12, 15, 16, 18, 20, 24, 25, 27, 30, 32, 36]
            );
        }

        #[test]
        fn agrees_with_filtering_the_naturals() {
            let expected: Vec<u64> = (1..).filter(|n| is_hamming_number(*n)).take(60).collect();
            assert_eq!(hamming().take(60).to_vec(), expected);
        }

        #[test]
        fn is_strictly_ascending() {
            let terms = hamming().take(40).to_vec();
            assert!(terms.windows(2).all(|pair| pair[0] < pair[1]));
        }

        #[test]
        fn forcing_rest_twice_yields_equal_streams() -> R<()> {
            let stream = hamming();
            assert_eq!(stream.rest()?.take(10).to_vec(), stream.rest()?.take(10).to_vec());
            Ok(())
        }
    }

    mod multiply {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn scales_every_element() {
            assert_eq!(multiply(&hamming().take(3), 5).to_vec(), vec![5, 10, 15]);
        }

        #[test]
        fn multiplying_empty_is_empty() {
            assert!(multiply(&Stream::empty(), 7).is_empty());
        }

        #[test]
        fn ends_before_the_first_overflowing_product() {
            let stream = stream![u64::MAX / 2, u64::MAX / 2 + 1, u64::MAX];
            assert_eq!(multiply(&stream, 2).to_vec(), vec![u64::MAX - 1]);
        }

        #[test]
        fn keeps_products_up_to_the_maximum() {
            assert_eq!(multiply(&stream![u64::MAX / 5], 5).to_vec(), vec![u64::MAX]);
        }
    }

    mod merge {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn interleaves_ascending_streams() {
            let merged = merge(&stream![1, 4, 9], &stream![2, 3, 10]);
            assert_eq!(merged.to_vec(), vec![1, 2, 3, 4, 9, 10]);
        }

        #[test]
        fn emits_shared_elements_once() {
            let merged = merge(&stream![2, 4, 6, 8], &stream![3, 6, 9]);
            assert_eq!(merged.to_vec(), vec![2, 3, 4, 6, 8, 9]);
        }

        #[test]
        fn empty_input_yields_the_other_input() {
            let empty: Stream<u64> = stream![];
            assert_eq!(merge(&empty, &stream![1, 2]).to_vec(), vec![1, 2]);
            assert_eq!(merge(&stream![1, 2], &empty).to_vec(), vec![1, 2]);
            assert!(merge(&empty, &empty).is_empty());
        }

        #[test]
        fn continues_after_one_input_runs_out() {
            let merged = merge(&stream![1], &stream![2, 3, 4]);
            assert_eq!(merged.to_vec(), vec![1, 2, 3, 4]);
        }

        #[test]
        fn works_on_infinite_streams() {
            let evens = multiply(&hamming(), 2);
            let threes = multiply(&hamming(), 3);
            assert_eq!(
                merge(&evens, &threes).take(6).to_vec(),
                vec![2, 3, 4, 6, 8, 9]
            );
        }
    }

    proptest! {
        #[test]
        fn merge_is_the_sorted_union(
            a in prop::collection::btree_set(0u64..500, 0..40),
            b in prop::collection::btree_set(0u64..500, 0..40),
        ) {
            let merged = merge(
                &Stream::from(a.iter().cloned().collect::<Vec<_>>()),
                &Stream::from(b.iter().cloned().collect::<Vec<_>>()),
            )
            .to_vec();
            let union: Vec<u64> = a.union(&b).cloned().collect();
            prop_assert_eq!(merged, union);
        }
    }
}
