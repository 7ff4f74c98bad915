//! Geometric values with native fast paths.

use derive_more::{Deref, From, Into};
use tightwire_codec::serde::arrays::MAX_PREALLOC_ELEMENTS;
use tightwire_codec::{
    Deser, ElementKind, Format, FormatConfig, Result, Ser, WireRead, WireWrite, WriteLen,
};


pub const POINT2_TYPE_NAME: &str = "geom.Point2";
pub const POINT3_TYPE_NAME: &str = "geom.Point3";
pub const POLYLINE_TYPE_NAME: &str = "geom.Polyline";

/// Builds a [`Format`] with every geometry type registered as a native codec.
pub fn geometry_format(config: FormatConfig) -> Format {
    Format::builder(config)
        .native::<Point2>(POINT2_TYPE_NAME)
        .native::<Point3>(POINT3_TYPE_NAME)
        .native::<Polyline>(POLYLINE_TYPE_NAME)
        .build()
}

#[derive(From, PartialEq, Clone, Copy, Default, Debug)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Ser for Point2 {
    fn ser(&self, w: &mut dyn WireWrite) -> Result<WriteLen> {
        let mut w_len = w.write_f64(self.x)?;
        w_len += w.write_f64(self.y)?;
        Ok(w_len)
    }
}
impl Deser for Point2 {
    fn deser(r: &mut dyn WireRead) -> Result<Self> {
        let x = r.read_f64()?;
        let y = r.read_f64()?;
        Ok(Self { x, y })
    }
}

#[derive(From, PartialEq, Clone, Copy, Default, Debug)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Ser for Point3 {
    fn ser(&self, w: &mut dyn WireWrite) -> Result<WriteLen> {
        let mut w_len = w.write_f64(self.x)?;
        w_len += w.write_f64(self.y)?;
        w_len += w.write_f64(self.z)?;
        Ok(w_len)
    }
}
impl Deser for Point3 {
    fn deser(r: &mut dyn WireRead) -> Result<Self> {
        let x = r.read_f64()?;
        let y = r.read_f64()?;
        let z = r.read_f64()?;
        Ok(Self { x, y, z })
    }
}

/// Bounded by the format's double-array limit, at two doubles per point.
///
/// ```text
/// struct Polyline {
///     count:  varint,
///     points: [(f64, f64); count],
/// }
/// ```
#[derive(From, Into, Deref, PartialEq, Clone, Default, Debug)]
pub struct Polyline(Vec<Point2>);

impl Polyline {
    fn check_point_count(format: &Format, count: u64) -> Result<usize> {
        format
            .limits()
            .check_count(ElementKind::Double, count.saturating_mul(2))?;
        Ok(count as usize)
    }
}

impl Ser for Polyline {
    fn ser(&self, w: &mut dyn WireWrite) -> Result<WriteLen> {
        Self::check_point_count(w.format(), self.0.len() as u64)?;
        let mut w_len = w.write_uint(self.0.len() as u64)?;
        for point in self.0.iter() {
            w_len += point.ser(w)?;
        }
        Ok(w_len)
    }
}
impl Deser for Polyline {
    fn deser(r: &mut dyn WireRead) -> Result<Self> {
        let count = r.read_uint()?;
        let count = Self::check_point_count(r.format(), count)?;
        log::trace!("Reading polyline of {count} points.");

        let mut points = Vec::with_capacity(count.min(MAX_PREALLOC_ELEMENTS));
        for _ in 0..count {
            points.push(Point2::deser(r)?);
        }
        Ok(Self(points))
    }
}
