use crate::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get_mut(y * self.width + x)
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<(), Error> {
        let slot = self.get_mut(x, y).ok_or(Error::OutOfBounds)?;
        *slot = value;
        Ok(())
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    pub fn as_view_mut(&mut self) -> ImageViewMut<'_, T> {
        ImageViewMut {
            width: self.width,
            height: self.height,
            data: &mut self.data,
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        let len = width.checked_mul(height).expect("grid size overflow");
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }
}

/// Read-only borrow of a packed row-major grid.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the in-grid `(x, y)` for signed coordinates, or `None` when the
    /// coordinate falls outside `0..width` × `0..height`.
    #[inline]
    pub fn in_bounds(&self, x: isize, y: isize) -> Option<(usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }

        let (xu, yu) = (x as usize, y as usize);
        if xu >= self.width || yu >= self.height {
            return None;
        }

        Some((xu, yu))
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }
}

/// Mutable borrow used to fill a grid row by row.
#[derive(Debug)]
pub struct ImageViewMut<'a, T> {
    width: usize,
    height: usize,
    data: &'a mut [T],
}

impl<T> ImageViewMut<'_, T> {
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::Image;
    use crate::Error;

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Image::from_vec(3, 2, vec![0u8; 5]).unwrap_err();
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn in_bounds_covers_last_row_and_column() {
        let img = Image::new_fill(4, 3, 0u8);
        let img = img.as_view();

        assert_eq!(img.in_bounds(3, 2), Some((3, 2)));
        assert_eq!(img.in_bounds(0, 0), Some((0, 0)));
        assert_eq!(img.in_bounds(4, 2), None);
        assert_eq!(img.in_bounds(3, 3), None);
        assert_eq!(img.in_bounds(-1, 0), None);
        assert_eq!(img.in_bounds(0, -1), None);
    }

    #[test]
    fn set_reports_out_of_bounds() {
        let mut img = Image::new_fill(2, 2, 0u8);
        img.set(1, 1, 7).expect("in bounds");
        assert_eq!(img.get(1, 1), Some(&7));
        assert_eq!(img.set(2, 0, 1), Err(Error::OutOfBounds));
    }

    #[test]
    fn view_reads_row_major_cells() {
        let img = Image::from_vec(3, 2, vec![1u8, 2, 3, 4, 5, 6]).expect("valid image");
        let view = img.as_view();

        assert_eq!(view.get(2, 1), Some(&6));
        assert_eq!(view.get(0, 1), Some(&4));
        assert_eq!(view.get(3, 1), None);
    }

    #[test]
    fn mutable_view_writes_rows_through() {
        let mut img = Image::new_fill(3, 2, 0u8);
        {
            let mut view = img.as_view_mut();
            view.row_mut(1).copy_from_slice(&[7, 8, 9]);
            view.row_mut(0)[0] = 5;
        }
        assert_eq!(img.data(), &[5, 0, 0, 7, 8, 9]);
    }
}
