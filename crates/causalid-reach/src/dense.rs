//! Dense multi-dimensional lookup tables.
//!
//! The automaton precomputes, for every pair of traversal states, which rule
//! fires and which colors are reachable. Those tables are indexed millions of
//! times per query, so they are stored as flat vectors with row-major strides.

/// Flat 2-dimensional table.
#[derive(Debug)]
pub(crate) struct Dense2<T> {
    data: Vec<T>,
    dim1: usize,
}

impl<T: Clone> Dense2<T> {
    pub(crate) fn filled(dim0: usize, dim1: usize, value: T) -> Self {
        Self {
            data: vec![value; dim0 * dim1],
            dim1,
        }
    }

    #[inline]
    pub(crate) fn get(&self, i: usize, j: usize) -> &T {
        &self.data[i * self.dim1 + j]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, i: usize, j: usize) -> &mut T {
        &mut self.data[i * self.dim1 + j]
    }
}

/// Flat 3-dimensional table.
#[derive(Debug)]
pub(crate) struct Dense3<T> {
    data: Vec<T>,
    dim1: usize,
    dim2: usize,
}

impl<T: Clone> Dense3<T> {
    pub(crate) fn filled(dim0: usize, dim1: usize, dim2: usize, value: T) -> Self {
        Self {
            data: vec![value; dim0 * dim1 * dim2],
            dim1,
            dim2,
        }
    }

    #[inline]
    pub(crate) fn get(&self, i: usize, j: usize, k: usize) -> &T {
        &self.data[(i * self.dim1 + j) * self.dim2 + k]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, i: usize, j: usize, k: usize) -> &mut T {
        &mut self.data[(i * self.dim1 + j) * self.dim2 + k]
    }
}

/// Flat 4-dimensional table.
#[derive(Debug)]
pub(crate) struct Dense4<T> {
    data: Vec<T>,
    dim1: usize,
    dim2: usize,
    dim3: usize,
}

impl<T: Clone> Dense4<T> {
    pub(crate) fn filled(dim0: usize, dim1: usize, dim2: usize, dim3: usize, value: T) -> Self {
        Self {
            data: vec![value; dim0 * dim1 * dim2 * dim3],
            dim1,
            dim2,
            dim3,
        }
    }

    #[inline]
    pub(crate) fn get(&self, i: usize, j: usize, k: usize, l: usize) -> &T {
        &self.data[((i * self.dim1 + j) * self.dim2 + k) * self.dim3 + l]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, i: usize, j: usize, k: usize, l: usize) -> &mut T {
        &mut self.data[((i * self.dim1 + j) * self.dim2 + k) * self.dim3 + l]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense2_round_trip() {
        let mut t = Dense2::filled(3, 4, 0usize);
        *t.get_mut(2, 3) = 7;
        assert_eq!(*t.get(2, 3), 7);
        assert_eq!(*t.get(0, 0), 0);
    }

    #[test]
    fn test_dense4_distinct_cells() {
        let mut t = Dense4::filled(2, 2, 2, 2, false);
        *t.get_mut(1, 0, 1, 0) = true;
        assert!(*t.get(1, 0, 1, 0));
        assert!(!*t.get(0, 1, 0, 1));
    }
}
