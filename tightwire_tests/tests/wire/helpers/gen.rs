use rand::distributions::{Alphanumeric, DistString};
use rand::Rng;
use tightwire_codec::Decimal;
use tightwire_geom::{Point2, Point3, Polyline};

pub fn gen_str(rng: &mut impl Rng, max_len: usize) -> String {
    let len = rng.gen_range(0..=max_len);
    Alphanumeric.sample_string(rng, len)
}

pub fn gen_opt_str(rng: &mut impl Rng, max_len: usize) -> Option<String> {
    match rng.gen_range(0..4) {
        0 => None,
        1 => Some(String::new()),
        _ => Some(gen_str(rng, max_len)),
    }
}

pub fn gen_decimal(rng: &mut impl Rng) -> Decimal {
    let magnitude = rng.gen_range(0..=Decimal::MAX_MAGNITUDE);
    let scale = rng.gen_range(0..=Decimal::MAX_SCALE);
    Decimal::from_parts(magnitude, scale, rng.gen()).unwrap_or(Decimal::ZERO)
}

pub fn gen_point2(rng: &mut impl Rng) -> Point2 {
    Point2 {
        x: rng.gen_range(-1e6..1e6),
        y: rng.gen_range(-1e6..1e6),
    }
}

pub fn gen_point3(rng: &mut impl Rng) -> Point3 {
    Point3 {
        x: rng.gen(),
        y: rng.gen(),
        z: rng.gen(),
    }
}

pub fn gen_polyline(rng: &mut impl Rng, max_len: usize) -> Polyline {
    let len = rng.gen_range(0..=max_len);
    (0..len)
        .map(|_| gen_point2(rng))
        .collect::<Vec<_>>()
        .into()
}
