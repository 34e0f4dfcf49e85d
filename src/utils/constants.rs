pub const PROTOCOL_ID: [u8; 3] = *b"ord";

pub const BODY_TAG: [u8; 0] = [];
/// Tag 1, representing the MIME type of the body.
pub const CONTENT_TYPE_TAG: [u8; 1] = [1];
/// Tag 5, representing CBOR metadata, stored as data pushes.
pub const METADATA_TAG: [u8; 1] = [5];

/// Amount carried by the inscribed output, in satoshis.
pub const POSTAGE: u64 = 546;

/// Interval between explorer polls while waiting for the funding UTXO.
pub const UTXO_POLL_INTERVAL_SECS: u64 = 4;
