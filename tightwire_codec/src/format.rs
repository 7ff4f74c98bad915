use crate::config::FormatConfig;
use crate::schema::{TypeName, TypeSchema};
use crate::serde::{FormatLimits, SharedTextEncoding};
use crate::streamer::{WireRead, WireReader, WireWrite, WireWriter, WriteLen};
use crate::types::{Deser, Ser};
use crate::{Result, WireError};
use std::any::{self, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;


pub type NativeEncode = fn(&dyn Any, &mut dyn WireWrite) -> Result<WriteLen>;
pub type NativeDecode = fn(&mut dyn WireRead) -> Result<Box<dyn Any + Send>>;

/// A fast path for one runtime type.
#[derive(Clone)]
pub struct NativeCodec {
    type_id: TypeId,
    type_name: TypeName,
    encode: NativeEncode,
    decode: NativeDecode,
}

impl NativeCodec {
    pub fn of<T>(type_name: TypeName) -> Self
    where
        T: Ser + Deser + Any + Send,
    {
        Self::with::<T>(type_name, encode_native::<T>, decode_native::<T>)
    }

    pub fn with<T: Any>(type_name: TypeName, encode: NativeEncode, decode: NativeDecode) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name,
            encode,
            decode,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }
    pub fn encode(&self, value: &dyn Any, w: &mut dyn WireWrite) -> Result<WriteLen> {
        (self.encode)(value, w)
    }
    pub fn decode(&self, r: &mut dyn WireRead) -> Result<Box<dyn Any + Send>> {
        (self.decode)(r)
    }
}

impl fmt::Debug for NativeCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeCodec")
            .field("type_id", &self.type_id)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

fn encode_native<T: Ser + Any>(value: &dyn Any, w: &mut dyn WireWrite) -> Result<WriteLen> {
    match value.downcast_ref::<T>() {
        Some(t) => t.ser(w),
        None => Err(WireError::UnregisteredType {
            type_name: any::type_name::<T>().to_owned(),
        }),
    }
}

fn decode_native<T: Deser + Any + Send>(r: &mut dyn WireRead) -> Result<Box<dyn Any + Send>> {
    let t = T::deser(r)?;
    Ok(Box::new(t))
}

/// Runtime type -> native codec. Frozen once the [`Format`] is built.
#[derive(Default, Debug)]
struct NativeCodecs {
    by_type_id: HashMap<TypeId, NativeCodec>,
    by_name: HashMap<TypeName, TypeId>,
}

impl NativeCodecs {
    /// A later registration of the same type, or of the same name, replaces the earlier one.
    fn insert(&mut self, codec: NativeCodec) {
        if let Some(old) = self.by_type_id.remove(&codec.type_id) {
            log::warn!(
                "Native codec {} replaced by {}.",
                old.type_name,
                codec.type_name
            );
            self.by_name.remove(&old.type_name);
        }
        if let Some(old_type_id) = self.by_name.remove(&codec.type_name) {
            log::warn!("Native codec name {} reassigned.", codec.type_name);
            self.by_type_id.remove(&old_type_id);
        }
        self.by_name.insert(codec.type_name.clone(), codec.type_id);
        self.by_type_id.insert(codec.type_id, codec);
    }

    fn by_type_id(&self, type_id: TypeId) -> Option<&NativeCodec> {
        self.by_type_id.get(&type_id)
    }

    fn by_name(&self, name: &str) -> Option<&NativeCodec> {
        self.by_name
            .get(name)
            .and_then(|type_id| self.by_type_id.get(type_id))
    }
}

pub struct FormatBuilder {
    config: FormatConfig,
    natives: NativeCodecs,
}

impl FormatBuilder {
    pub fn new(config: FormatConfig) -> Self {
        Self {
            config,
            natives: NativeCodecs::default(),
        }
    }

    /// Registers `T`'s own [`Ser`]/[`Deser`] as its fast path.
    pub fn native<T>(mut self, type_name: impl Into<TypeName>) -> Self
    where
        T: Ser + Deser + Any + Send,
    {
        self.natives.insert(NativeCodec::of::<T>(type_name.into()));
        self
    }

    pub fn native_with<T: Any>(
        mut self,
        type_name: impl Into<TypeName>,
        encode: NativeEncode,
        decode: NativeDecode,
    ) -> Self {
        self.natives
            .insert(NativeCodec::with::<T>(type_name.into(), encode, decode));
        self
    }

    pub fn build(self) -> Format {
        let limits = self.config.limits();
        log::debug!(
            "Built format. {:?}, text encoding {:?}, {} native codec(s).",
            limits,
            self.config.text_encoding,
            self.natives.by_type_id.len()
        );
        Format {
            limits,
            encoding: self.config.text_encoding.shared(),
            schema: TypeSchema::new(),
            natives: self.natives,
        }
    }
}

/// The format descriptor.
///
/// Owns the limits, the default text encoding, the type schema, and the native codecs
/// shared by every writer and reader it makes.
/// There is no global instance; construct one and pass it by reference.
pub struct Format {
    limits: FormatLimits,
    encoding: SharedTextEncoding,
    schema: TypeSchema,
    natives: NativeCodecs,
}

impl Format {
    pub fn new(config: FormatConfig) -> Self {
        FormatBuilder::new(config).build()
    }

    pub fn builder(config: FormatConfig) -> FormatBuilder {
        FormatBuilder::new(config)
    }

    pub fn limits(&self) -> &FormatLimits {
        &self.limits
    }
    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }
    pub fn text_encoding(&self) -> &SharedTextEncoding {
        &self.encoding
    }

    /// `encoding` defaults to the format's configured encoding.
    pub fn make_writer<W: Write>(
        &self,
        w: W,
        encoding: Option<SharedTextEncoding>,
    ) -> WireWriter<'_, W> {
        let encoding = encoding.unwrap_or_else(|| Arc::clone(&self.encoding));
        WireWriter::new(self, w, encoding)
    }

    /// `encoding` defaults to the format's configured encoding.
    pub fn make_reader<R: Read>(
        &self,
        r: R,
        encoding: Option<SharedTextEncoding>,
    ) -> WireReader<'_, R> {
        let encoding = encoding.unwrap_or_else(|| Arc::clone(&self.encoding));
        WireReader::new(self, r, encoding)
    }

    pub fn native_for_type_id(&self, type_id: TypeId) -> Option<&NativeCodec> {
        self.natives.by_type_id(type_id)
    }
    pub fn native_for<T: Any>(&self) -> Option<&NativeCodec> {
        self.native_for_type_id(TypeId::of::<T>())
    }
    pub fn native_by_name(&self, type_name: &str) -> Option<&NativeCodec> {
        self.natives.by_name(type_name)
    }
    pub fn supports<T: Any>(&self) -> bool {
        self.native_for::<T>().is_some()
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::new(FormatConfig::default())
    }
}
