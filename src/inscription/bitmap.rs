//! Bitmap parent ordinal

use std::io::Cursor;

use bitcoin::opcodes;
use bitcoin::script::{Builder as ScriptBuilder, PushBytesBuf};
use serde::{Deserialize, Serialize};

use crate::utils::{bytes_to_push_bytes, constants};
use crate::{Inscription, OrdResult};

/// Script pushes are limited to 520 bytes, so larger payloads are split.
const CHUNK_SIZE: usize = 520;

const CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// CBOR metadata carried under tag 5 of the inscription envelope.
///
/// Indexers decode this to attach structured information to the inscription,
/// such as the collection it belongs to.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BitmapMetadata {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// A `bitmap` parent ordinal inscription.
///
/// The body is the district name (e.g. `reinscription.bitmap`) inscribed as
/// plain text, with CBOR metadata describing the parent collection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bitmap {
    body: String,
    metadata: BitmapMetadata,
}

impl Bitmap {
    /// Creates a new parent `Bitmap` inscription for the given district.
    pub fn parent(district: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            body: district.into(),
            metadata: BitmapMetadata {
                kind: "Bitmap".to_string(),
                description: description.into(),
            },
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn metadata(&self) -> &BitmapMetadata {
        &self.metadata
    }

    /// Encodes the metadata as CBOR, as expected by ordinals indexers.
    pub fn metadata_cbor(&self) -> OrdResult<Vec<u8>> {
        let mut bytes = Vec::new();
        ciborium::into_writer(&self.metadata, &mut bytes)?;

        Ok(bytes)
    }

    /// Decodes CBOR metadata bytes back into a [`BitmapMetadata`].
    pub fn metadata_from_cbor(bytes: &[u8]) -> Option<BitmapMetadata> {
        ciborium::from_reader(Cursor::new(bytes)).ok()
    }
}

impl Inscription for Bitmap {
    fn content_type(&self) -> String {
        CONTENT_TYPE.to_string()
    }

    fn data(&self) -> OrdResult<PushBytesBuf> {
        bytes_to_push_bytes(self.body.as_bytes())
    }

    fn append_reveal_script_to_builder(
        &self,
        mut builder: ScriptBuilder,
    ) -> OrdResult<ScriptBuilder> {
        builder = builder
            .push_opcode(opcodes::OP_FALSE)
            .push_opcode(opcodes::all::OP_IF)
            .push_slice(constants::PROTOCOL_ID)
            .push_slice(constants::CONTENT_TYPE_TAG)
            .push_slice(bytes_to_push_bytes(self.content_type().as_bytes())?);

        for chunk in self.metadata_cbor()?.chunks(CHUNK_SIZE) {
            builder = builder
                .push_slice(constants::METADATA_TAG)
                .push_slice(bytes_to_push_bytes(chunk)?);
        }

        builder = builder.push_slice(constants::BODY_TAG);
        for chunk in self.body.as_bytes().chunks(CHUNK_SIZE) {
            builder = builder.push_slice(bytes_to_push_bytes(chunk)?);
        }

        Ok(builder.push_opcode(opcodes::all::OP_ENDIF))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent_bitmap() -> Bitmap {
        Bitmap::parent("reinscription.bitmap", "Bitmap Community Parent Ordinal")
    }

    #[test]
    fn bitmap_creation() {
        let bitmap = parent_bitmap();

        assert_eq!(bitmap.content_type(), "text/plain;charset=utf-8");
        assert_eq!(bitmap.body(), "reinscription.bitmap");
        assert_eq!(bitmap.metadata().kind, "Bitmap");
    }

    #[test]
    fn body_as_push_bytes() {
        let bitmap = parent_bitmap();

        let push_bytes = bitmap.data().unwrap();
        assert_eq!(push_bytes.as_bytes(), bitmap.body().as_bytes());
    }

    #[test]
    fn metadata_cbor_roundtrip() {
        let bitmap = parent_bitmap();

        let cbor = bitmap.metadata_cbor().unwrap();
        let decoded = Bitmap::metadata_from_cbor(&cbor).unwrap();
        assert_eq!(&decoded, bitmap.metadata());
    }

    #[test]
    fn metadata_cbor_is_a_map() {
        let cbor = parent_bitmap().metadata_cbor().unwrap();

        let value: ciborium::Value = ciborium::from_reader(Cursor::new(&cbor)).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[0].0, ciborium::Value::Text("type".to_string()));
        assert_eq!(map[0].1, ciborium::Value::Text("Bitmap".to_string()));
    }

    #[test]
    fn metadata_from_cbor_returns_none_on_garbage() {
        assert!(Bitmap::metadata_from_cbor(&[0x44]).is_none());
    }

    #[test]
    fn reveal_script_envelope() {
        let script = parent_bitmap()
            .append_reveal_script_to_builder(ScriptBuilder::new())
            .unwrap()
            .into_script();

        // OP_FALSE, OP_IF, "ord", tag 1, content type, tag 5, metadata,
        // body tag, body, OP_ENDIF
        assert_eq!(script.instructions().count(), 10);

        let bytes = script.as_bytes();
        assert_eq!(bytes[0], opcodes::OP_FALSE.to_u8());
        assert_eq!(bytes[1], opcodes::all::OP_IF.to_u8());
        assert_eq!(*bytes.last().unwrap(), opcodes::all::OP_ENDIF.to_u8());
    }

    #[test]
    fn reveal_script_chunks_body() {
        let short = Bitmap::parent("a".repeat(520), "desc")
            .append_reveal_script_to_builder(ScriptBuilder::new())
            .unwrap()
            .into_script();
        let long = Bitmap::parent("a".repeat(521), "desc")
            .append_reveal_script_to_builder(ScriptBuilder::new())
            .unwrap()
            .into_script();

        assert_eq!(
            long.instructions().count(),
            short.instructions().count() + 1
        );
    }
}
