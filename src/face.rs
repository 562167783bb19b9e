//! Triangle faces referencing mesh vertices by 1-based index.

/// A triangle of the mesh.
///
/// `a`, `b` and `c` are 1-based indices into the vertex array, so index 0 is
/// never a valid vertex (or face) id. The normal slots start out unset and are
/// filled in once by [`crate::normals`] when the [`crate::Model`] is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    /// 1-based vertex-normal ids for the `a`, `b`, `c` corners.
    pub vertex_normals: [Option<u32>; 3],
    /// 1-based face-normal id. Stays `None` for zero-area faces.
    pub face_normal: Option<u32>,
}

impl Face {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self {
            a,
            b,
            c,
            vertex_normals: [None; 3],
            face_normal: None,
        }
    }

    /// Corner vertex ids in winding order.
    #[inline]
    pub fn corners(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }

    /// Position of `vertex` among this face's corners.
    pub fn corner_of(&self, vertex: u32) -> Option<usize> {
        self.corners().iter().position(|&v| v == vertex)
    }

    /// A face is drawn only once every normal slot has been assigned.
    #[inline]
    pub fn is_renderable(&self) -> bool {
        self.face_normal.is_some() && self.vertex_normals.iter().all(Option::is_some)
    }
}

impl From<[u32; 3]> for Face {
    fn from([a, b, c]: [u32; 3]) -> Self {
        Self::new(a, b, c)
    }
}
