/// Side length of the playing field.
pub const SIZE: usize = 4;

/// Square matrix of cells, indexed `[row][column]`.
pub type Grid<T, const N: usize> = [[T; N]; N];

/// Rotates a square matrix 90° counterclockwise, returning a new matrix.
///
/// The last column of the input becomes the first row of the output, so after one
/// rotation the former top edge sits on the left. Sliding left on a matrix rotated
/// `d` times is the same as sliding in direction `d` on the original.
pub fn rotate_left<T: Copy, const N: usize>(matrix: &Grid<T, N>) -> Grid<T, N> {
    std::array::from_fn(|row| std::array::from_fn(|column| matrix[column][N - row - 1]))
}

pub fn rotate_left_times<T: Copy, const N: usize>(matrix: &Grid<T, N>, times: usize) -> Grid<T, N> {
    let mut out = *matrix;
    for _ in 0..times % 4 {
        out = rotate_left(&out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid<u32, SIZE> {
        [[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12], [13, 14, 15, 16]]
    }

    #[test]
    fn test_rotate_left_once() {
        let rotated = rotate_left(&sample());
        assert_eq!(
            rotated,
            [[4, 8, 12, 16], [3, 7, 11, 15], [2, 6, 10, 14], [1, 5, 9, 13]]
        );
    }

    #[test]
    fn test_rotate_left_does_not_touch_input() {
        let original = sample();
        let _ = rotate_left(&original);
        assert_eq!(original, sample());
    }

    #[test]
    fn test_four_rotations_are_identity() {
        let original = sample();
        let mut m = original;
        for _ in 0..4 {
            m = rotate_left(&m);
        }
        assert_eq!(m, original);
        assert_eq!(rotate_left_times(&original, 4), original);
        assert_eq!(rotate_left_times(&original, 5), rotate_left(&original));
    }

    #[test]
    fn test_rotate_other_sizes() {
        let m: Grid<u8, 2> = [[1, 2], [3, 4]];
        assert_eq!(rotate_left(&m), [[2, 4], [1, 3]]);

        let one: Grid<u8, 1> = [[7]];
        assert_eq!(rotate_left(&one), one);
    }
}
