use bitcoin::key::UntweakedKeypair;
use bitcoin::secp256k1::{All, Secp256k1};
use bitcoin::taproot::{ControlBlock, LeafVersion, TaprootBuilder};
use bitcoin::{Address, Amount, Network, ScriptBuf, TxOut, XOnlyPublicKey};

use crate::{OrdError, OrdResult};

/// Everything needed to later spend the commit output through the script
/// path: the committed address, the control block of the inscription leaf and
/// the prevout the reveal transaction spends.
#[derive(Debug, Clone)]
pub struct TaprootPayload {
    pub address: Address,
    pub control_block: ControlBlock,
    pub prevout: TxOut,
    pub keypair: UntweakedKeypair,
}

impl TaprootPayload {
    /// Derives the P2TR address committing to the redeem script as its single
    /// depth-0 leaf, with the wallet key as internal key.
    pub fn build(
        secp: &Secp256k1<All>,
        keypair: UntweakedKeypair,
        internal_key: XOnlyPublicKey,
        redeem_script: &ScriptBuf,
        reveal_balance: Amount,
        network: Network,
    ) -> OrdResult<Self> {
        let builder = TaprootBuilder::with_huffman_tree(vec![(1, redeem_script.clone())])
            .map_err(|_| OrdError::TaprootCompute)?;
        let spend_info = builder
            .finalize(secp, internal_key)
            .map_err(|_| OrdError::TaprootCompute)?;

        let control_block = spend_info
            .control_block(&(redeem_script.clone(), LeafVersion::TapScript))
            .ok_or(OrdError::TaprootCompute)?;
        let address = Address::p2tr_tweaked(spend_info.output_key(), network);
        let prevout = TxOut {
            value: reveal_balance,
            script_pubkey: address.script_pubkey(),
        };

        Ok(Self {
            address,
            control_block,
            prevout,
            keypair,
        })
    }
}
