use thiserror::Error;

/// Reinscription error
#[derive(Error, Debug)]
pub enum OrdError {
    #[error("CBOR codec error: {0}")]
    CborCodec(#[from] ciborium::ser::Error<std::io::Error>),
    #[error("Bitcoin sighash error: {0}")]
    BitcoinSigHash(#[from] bitcoin::sighash::Error),
    #[error("Bitcoin script error: {0}")]
    PushBytes(#[from] bitcoin::script::PushBytesError),
    #[error("secp256k1 error: {0}")]
    Signature(#[from] bitcoin::secp256k1::Error),
    #[error("invalid transaction id: {0}")]
    TxidParse(#[from] bitcoin::hashes::hex::HexToArrayError),
    #[error("taproot compute error")]
    TaprootCompute,
    #[error("no taproot payload: the funding transaction must be built first")]
    NoTaprootPayload,
    #[error("bad transaction input: {0}")]
    InputNotFound(usize),
    #[error("insufficient balance")]
    InsufficientBalance,
    #[error("explorer request error: {0}")]
    Explorer(#[from] reqwest::Error),
    #[error("explorer rejected the transaction: {0}")]
    Broadcast(String),
}
