pub mod bitmap;

use bitcoin::script::{Builder as ScriptBuilder, PushBytesBuf};

use crate::OrdResult;

/// An inscription that can be embedded in the redeem script of a commit and
/// reveal transaction pair.
///
/// The redeem script wraps the inscription in the `ord` envelope:
///
/// - public key
/// - OP_CHECKSIG
/// - OP_FALSE
/// - OP_IF
/// - ord
/// - 0x01
/// - {inscription.content_type()}
/// - field tags and payloads
/// - OP_ENDIF
pub trait Inscription {
    /// Returns the content type of the inscription.
    fn content_type(&self) -> String;

    /// Returns the inscription body as to be pushed to the redeem script.
    fn data(&self) -> OrdResult<PushBytesBuf>;

    /// Appends the `ord` envelope (OP_FALSE OP_IF ... OP_ENDIF) to the given
    /// script builder.
    fn append_reveal_script_to_builder(
        &self,
        builder: ScriptBuilder,
    ) -> OrdResult<ScriptBuilder>;
}
