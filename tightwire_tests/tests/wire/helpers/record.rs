use super::gen;
use rand::Rng;
use std::any::Any;
use tightwire_codec::{
    Decimal, Deser, Result, Ser, WireRead, WireReadExt, WireWrite, WriteLen,
};
use tightwire_geom::{Point3, Polyline};

/// A value touching every operation of the writer and reader.
#[derive(PartialEq, Clone, Debug)]
pub struct Record {
    pub id: i64,
    pub seq: u32,
    pub ratio: f32,
    pub score: f64,
    pub price: Decimal,
    pub active: bool,
    pub name: Option<String>,
    pub tags: Vec<Option<String>>,
    pub payload: Vec<u8>,
    pub samples: Vec<i32>,
    pub counters: Vec<i64>,
    pub weights: Vec<f32>,
    pub readings: Vec<f64>,
    pub flags: Vec<bool>,
    pub amounts: Vec<Decimal>,
    pub origin: Option<Point3>,
    pub path: Polyline,
}

impl Record {
    pub fn gen(rng: &mut impl Rng, max_str_len: usize, max_arr_len: usize) -> Self {
        let mut len = || rng.gen_range(0..=max_arr_len);
        let (tags_len, payload_len, samples_len) = (len(), len(), len());
        let (counters_len, weights_len, readings_len) = (len(), len(), len());
        let (flags_len, amounts_len) = (len(), len());
        Self {
            id: rng.gen(),
            seq: rng.gen(),
            ratio: rng.gen(),
            score: rng.gen(),
            price: gen::gen_decimal(rng),
            active: rng.gen(),
            name: gen::gen_opt_str(rng, max_str_len),
            tags: (0..tags_len)
                .map(|_| gen::gen_opt_str(rng, max_str_len))
                .collect(),
            payload: (0..payload_len).map(|_| rng.gen()).collect(),
            samples: (0..samples_len).map(|_| rng.gen()).collect(),
            counters: (0..counters_len).map(|_| rng.gen()).collect(),
            weights: (0..weights_len).map(|_| rng.gen()).collect(),
            readings: (0..readings_len).map(|_| rng.gen()).collect(),
            flags: (0..flags_len).map(|_| rng.gen()).collect(),
            amounts: (0..amounts_len).map(|_| gen::gen_decimal(rng)).collect(),
            origin: rng.gen::<bool>().then(|| gen::gen_point3(rng)),
            path: gen::gen_polyline(rng, max_arr_len / 2),
        }
    }
}

impl Ser for Record {
    fn ser(&self, w: &mut dyn WireWrite) -> Result<WriteLen> {
        let mut w_len = w.write_int(self.id)?;
        w_len += w.write_u32(self.seq)?;
        w_len += w.write_f32(self.ratio)?;
        w_len += w.write_f64(self.score)?;
        w_len += w.write_decimal(&self.price)?;
        w_len += w.write_bool(self.active)?;
        w_len += w.write_string(self.name.as_deref())?;
        w_len += w.write_string_array(&self.tags)?;
        w_len += w.write_bytes(&self.payload)?;
        w_len += w.write_i32_array(&self.samples)?;
        w_len += w.write_i64_array(&self.counters)?;
        w_len += w.write_f32_array(&self.weights)?;
        w_len += w.write_f64_array(&self.readings)?;
        w_len += w.write_bool_array(&self.flags)?;
        w_len += w.write_decimal_array(&self.amounts)?;
        w_len += w.write_object(self.origin.as_ref().map(|p| p as &dyn Any))?;
        w_len += w.write_object(Some(&self.path))?;
        Ok(w_len)
    }
}

impl Deser for Record {
    fn deser(r: &mut dyn WireRead) -> Result<Self> {
        Ok(Self {
            id: r.read_int()?,
            seq: r.read_u32()?,
            ratio: r.read_f32()?,
            score: r.read_f64()?,
            price: r.read_decimal()?,
            active: r.read_bool()?,
            name: r.read_string()?,
            tags: r.read_string_array()?,
            payload: r.read_bytes()?,
            samples: r.read_i32_array()?,
            counters: r.read_i64_array()?,
            weights: r.read_f32_array()?,
            readings: r.read_f64_array()?,
            flags: r.read_bool_array()?,
            amounts: r.read_decimal_array()?,
            origin: r.read_object_as::<Point3>()?,
            path: r.read_object_as::<Polyline>()?.unwrap_or_default(),
        })
    }
}
