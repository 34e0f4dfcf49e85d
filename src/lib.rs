//! # ord-reinscribe
//!
//! Building blocks for reinscribing a parent Ordinal inscription and
//! forwarding the resulting UTXO to a recipient.
//!
//! A reinscription is a pair of transactions:
//!
//! 1. a **funding** transaction spending key-path P2TR UTXOs of the wallet
//!    into a Taproot output committed to a script leaf carrying the
//!    inscription envelope;
//! 2. a **reveal** transaction spending that output through the script path,
//!    revealing the envelope and paying the postage to the recipient.
//!
//! [`ReinscriptionBuilder`] builds and signs both transactions,
//! [`rpc::EsploraClient`] talks to a mempool.space-style explorer to resolve
//! input amounts, wait for the funding UTXO and broadcast.

mod error;
mod inscription;
mod result;
pub mod rpc;
pub mod utils;
pub mod wallet;

pub use error::OrdError;
pub use inscription::bitmap::{Bitmap, BitmapMetadata};
pub use inscription::Inscription;
pub use result::OrdResult;
pub use wallet::{
    CreateFundingTransaction, CreateFundingTransactionArgs, ReinscriptionBuilder,
    RevealTransactionArgs, Utxo,
};
