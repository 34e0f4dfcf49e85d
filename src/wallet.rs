pub mod builder;

pub use builder::{
    CreateFundingTransaction, CreateFundingTransactionArgs, ReinscriptionBuilder,
    RevealTransactionArgs, Utxo,
};
