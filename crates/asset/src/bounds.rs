//! Axis-aligned bounding box and geometry normalization.

use glam::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Component-wise min/max over `points`. An empty input yields the zero box.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::default();
        };

        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Self { min, max }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Width/height/depth of the box.
    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn max_extent(&self) -> f32 {
        self.extent().max_element()
    }
}

/// Recentering + isotropic rescale applied to a mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalization {
    pub center: Vec3,
    pub scale: f32,
}

impl Normalization {
    /// Returns `None` for a degenerate box (largest extent not positive).
    pub fn for_bounds(bounds: &Aabb) -> Option<Self> {
        let max_extent = bounds.max_extent();
        if max_extent > 0.0 {
            Some(Self {
                center: bounds.center(),
                scale: 1.0 / max_extent,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn apply(&self, position: Vec3) -> Vec3 {
        (position - self.center) * self.scale
    }
}
