//! Vertex → face adjacency.
//!
//! The table is rectangular: every vertex owns a row of `degree` slots, where
//! `degree` is the largest number of faces touching any single vertex. A row
//! lists the 1-based ids of the faces using that vertex, in face order, and is
//! padded with `0` past the vertex's own degree. Face ids start at 1 so the
//! padding can never be mistaken for a real face.

use crate::face::Face;

/// Padding value for unused adjacency slots.
pub const NO_FACE: u32 = 0;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyTable {
    slots: Vec<u32>,
    vertex_count: usize,
    degree: usize,
}

impl AdjacencyTable {
    /// Builds the table for `vertex_count` vertices.
    ///
    /// Faces without a face normal (zero-area triangles) are left out.
    /// Face corners must reference vertices in `1..=vertex_count`.
    pub fn build(faces: &[Face], vertex_count: usize) -> Self {
        let mut lists: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        for (i, face) in faces.iter().enumerate() {
            if face.face_normal.is_none() {
                continue;
            }
            let id = i as u32 + 1;
            for corner in face.corners() {
                lists[corner as usize - 1].push(id);
            }
        }

        let degree = lists.iter().map(Vec::len).max().unwrap_or(0);
        let mut slots = vec![NO_FACE; vertex_count * degree];
        for (row, list) in slots.chunks_exact_mut(degree.max(1)).zip(&lists) {
            row[..list.len()].copy_from_slice(list);
        }

        Self {
            slots,
            vertex_count,
            degree,
        }
    }

    /// Width of every row: the maximum number of faces sharing a vertex.
    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// The padded row for a 0-based vertex index.
    pub fn row(&self, vertex: usize) -> &[u32] {
        let start = vertex * self.degree;
        &self.slots[start..start + self.degree]
    }

    /// 1-based ids of the faces touching a 0-based vertex index.
    pub fn faces_of(&self, vertex: usize) -> impl Iterator<Item = u32> + '_ {
        self.row(vertex)
            .iter()
            .copied()
            .take_while(|&id| id != NO_FACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(a: u32, b: u32, c: u32, normal: Option<u32>) -> Face {
        Face {
            face_normal: normal,
            ..Face::new(a, b, c)
        }
    }

    #[test]
    fn rows_are_padded_to_max_degree() {
        let faces = [
            face(1, 2, 3, Some(1)),
            face(1, 3, 4, Some(2)),
            face(1, 4, 5, Some(3)),
        ];
        let table = AdjacencyTable::build(&faces, 5);

        assert_eq!(table.degree(), 3);
        assert_eq!(table.row(0), &[1, 2, 3]);
        assert_eq!(table.row(1), &[1, 0, 0]);
        assert_eq!(table.row(3), &[2, 3, 0]);
        assert_eq!(table.faces_of(4).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn faces_without_normal_are_skipped() {
        let faces = [face(1, 2, 3, Some(1)), face(1, 1, 2, None)];
        let table = AdjacencyTable::build(&faces, 3);

        assert_eq!(table.degree(), 1);
        assert_eq!(table.faces_of(0).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn isolated_vertex_has_empty_row() {
        let faces = [face(1, 2, 3, Some(1))];
        let table = AdjacencyTable::build(&faces, 4);

        assert_eq!(table.row(3), &[0]);
        assert_eq!(table.faces_of(3).count(), 0);
    }

    #[test]
    fn empty_mesh_has_zero_degree() {
        let table = AdjacencyTable::build(&[], 3);
        assert_eq!(table.degree(), 0);
        assert!(table.row(2).is_empty());
    }
}
