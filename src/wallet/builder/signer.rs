use bitcoin::hashes::Hash as _;
use bitcoin::key::{Secp256k1, TapTweak, UntweakedKeypair};
use bitcoin::secp256k1::{self, All};
use bitcoin::sighash::{Prevouts, SighashCache};
use bitcoin::taproot::LeafVersion;
use bitcoin::{
    PrivateKey, ScriptBuf, TapLeafHash, TapSighashType, Transaction, TxOut, Witness,
    XOnlyPublicKey,
};
use log::debug;

use super::super::builder::Utxo;
use super::taproot::TaprootPayload;
use crate::{OrdError, OrdResult};

/// A local signing wallet holding the reinscription key.
///
/// The same key serves as the key-path key of the funding inputs and as the
/// internal and leaf-script key of the inscription output.
pub struct Wallet {
    keypair: UntweakedKeypair,
    secp: Secp256k1<All>,
}

impl Wallet {
    pub fn new(private_key: &PrivateKey) -> Self {
        let secp = Secp256k1::new();
        let keypair = UntweakedKeypair::from_secret_key(&secp, &private_key.inner);

        Self { keypair, secp }
    }

    /// The x-only public key of the wallet.
    pub fn x_only_public_key(&self) -> XOnlyPublicKey {
        XOnlyPublicKey::from_keypair(&self.keypair).0
    }

    pub fn keypair(&self) -> &UntweakedKeypair {
        &self.keypair
    }

    /// Signs the funding transaction inputs, all of which must be key-path
    /// P2TR outputs locked to the wallet key, paying to `own_script_pubkey`.
    ///
    /// Key-path spending requires the BIP341 tweak of the keypair; signing
    /// with the untweaked key would not match the output key.
    pub fn sign_funding_transaction(
        &self,
        inputs: &[Utxo],
        transaction: Transaction,
        own_script_pubkey: &ScriptBuf,
    ) -> OrdResult<Transaction> {
        let tweaked = self.keypair.tap_tweak(&self.secp, None);

        let prevouts: Vec<TxOut> = inputs
            .iter()
            .map(|input| TxOut {
                value: input.amount,
                script_pubkey: own_script_pubkey.clone(),
            })
            .collect();

        let mut sighash_cache = SighashCache::new(transaction.clone());
        for index in 0..inputs.len() {
            let sighash = sighash_cache.taproot_key_spend_signature_hash(
                index,
                &Prevouts::All(&prevouts),
                TapSighashType::Default,
            )?;

            let msg = secp256k1::Message::from_digest(sighash.to_byte_array());
            let sig = self.secp.sign_schnorr_no_aux_rand(&msg, &tweaked.to_inner());

            // verify
            self.secp
                .verify_schnorr(&sig, &msg, &tweaked.to_inner().x_only_public_key().0)?;

            let signature = bitcoin::taproot::Signature {
                sig,
                hash_ty: TapSighashType::Default,
            };
            let mut witness = Witness::new();
            witness.push(signature.to_vec());
            self.set_input_witness(&mut sighash_cache, index, witness)?;
        }

        Ok(sighash_cache.into_transaction())
    }

    /// Signs the reveal transaction with a script-path Schnorr signature over
    /// the inscription leaf.
    pub fn sign_reveal_transaction_schnorr(
        &self,
        taproot: &TaprootPayload,
        redeem_script: &ScriptBuf,
        transaction: Transaction,
    ) -> OrdResult<Transaction> {
        let prevouts_array = vec![taproot.prevout.clone()];
        let prevouts = Prevouts::All(&prevouts_array);

        let mut sighash_cache = SighashCache::new(transaction.clone());
        let sighash_sig = sighash_cache.taproot_script_spend_signature_hash(
            0,
            &prevouts,
            TapLeafHash::from_script(redeem_script, LeafVersion::TapScript),
            TapSighashType::Default,
        )?;

        let msg = secp256k1::Message::from_digest(sighash_sig.to_byte_array());
        let sig = self.secp.sign_schnorr_no_aux_rand(&msg, &taproot.keypair);

        // verify
        self.secp
            .verify_schnorr(&sig, &msg, &taproot.keypair.x_only_public_key().0)?;

        let signature = bitcoin::taproot::Signature {
            sig,
            hash_ty: TapSighashType::Default,
        };

        // witness: signature, leaf script, control block
        let mut witness = Witness::new();
        witness.push(signature.to_vec());
        witness.push(redeem_script.as_bytes());
        witness.push(taproot.control_block.serialize());
        debug!("witness: {witness:?}");

        self.set_input_witness(&mut sighash_cache, 0, witness)?;

        Ok(sighash_cache.into_transaction())
    }

    fn set_input_witness(
        &self,
        sighasher: &mut SighashCache<Transaction>,
        index: usize,
        witness: Witness,
    ) -> OrdResult<()> {
        *sighasher
            .witness_mut(index)
            .ok_or(OrdError::InputNotFound(index))? = witness;

        Ok(())
    }
}
