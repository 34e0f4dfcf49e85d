pub mod signer;
mod taproot;

use bitcoin::absolute::LockTime;
use bitcoin::key::Secp256k1;
use bitcoin::opcodes;
use bitcoin::script::Builder as ScriptBuilder;
use bitcoin::transaction::Version;
use bitcoin::{
    Address, Amount, Network, OutPoint, PrivateKey, ScriptBuf, Sequence, Transaction, TxIn, TxOut,
    Txid, Witness, XOnlyPublicKey,
};
use log::debug;
use signer::Wallet;

use self::taproot::TaprootPayload;
use crate::inscription::Inscription;
use crate::utils::constants::POSTAGE;
use crate::{OrdError, OrdResult};

/// Builds the funding and reveal transaction pair that reinscribes a parent
/// ordinal and forwards it to a recipient.
pub struct ReinscriptionBuilder {
    public_key: XOnlyPublicKey,
    /// used to sign the reveal transaction through the script path
    taproot_payload: Option<TaprootPayload>,
    signer: Wallet,
}

#[derive(Debug)]
/// Arguments for creating a funding transaction
pub struct CreateFundingTransactionArgs<T>
where
    T: Inscription,
{
    /// Key-path P2TR UTXOs of the wallet to be used as inputs
    pub inputs: Vec<Utxo>,
    /// Inscription to write
    pub inscription: T,
    /// Address to send the leftover BTC of the transaction
    pub leftovers_recipient: Address,
    /// Fee to pay for the funding transaction
    pub commit_fee: Amount,
    /// Fee to pay for the reveal transaction
    pub reveal_fee: Amount,
}

#[derive(Debug, Clone)]
pub struct CreateFundingTransaction {
    /// The transaction to be broadcast
    pub tx: Transaction,
    /// The P2TR address committed to the inscription leaf
    pub taproot_address: Address,
    /// The redeem script to be revealed by the reveal transaction
    pub redeem_script: ScriptBuf,
    /// Balance carried to the reveal transaction
    pub reveal_balance: Amount,
}

/// Arguments for creating a reveal transaction
pub struct RevealTransactionArgs {
    /// Transaction input (output of the funding transaction)
    pub input: Utxo,
    /// Recipient address of the inscription and of the change
    pub recipient_address: Address,
    /// The redeem script returned by `build_funding_transaction`
    pub redeem_script: ScriptBuf,
    /// Fee to pay for the reveal transaction
    pub reveal_fee: Amount,
}

impl ReinscriptionBuilder {
    /// Initializes a builder with the given private key; the key serves both
    /// as the key-path key of the wallet UTXOs and as the internal key of the
    /// inscription output.
    pub fn new(private_key: PrivateKey) -> Self {
        let signer = Wallet::new(&private_key);
        Self {
            public_key: signer.x_only_public_key(),
            taproot_payload: None,
            signer,
        }
    }

    /// The wallet's own key-path P2TR address, which the funding inputs must
    /// pay to.
    pub fn own_address(&self, network: Network) -> Address {
        Address::p2tr(&Secp256k1::new(), self.public_key, None, network)
    }

    /// Creates the funding transaction: output 0 pays the reveal balance to
    /// the taproot address committed to the inscription, output 1 returns the
    /// leftovers.
    pub fn build_funding_transaction<T>(
        &mut self,
        network: Network,
        args: CreateFundingTransactionArgs<T>,
    ) -> OrdResult<CreateFundingTransaction>
    where
        T: Inscription,
    {
        let secp_ctx = Secp256k1::new();

        let redeem_script = self.generate_redeem_script(&args.inscription)?;
        debug!("redeem_script: {redeem_script}");

        let reveal_balance = POSTAGE + args.reveal_fee.to_sat();
        debug!("reveal_balance: {reveal_balance}");

        let taproot_payload = TaprootPayload::build(
            &secp_ctx,
            *self.signer.keypair(),
            self.public_key,
            &redeem_script,
            Amount::from_sat(reveal_balance),
            network,
        )?;
        let script_output_address = taproot_payload.address.clone();
        self.taproot_payload = Some(taproot_payload);
        debug!("script_output_address: {script_output_address}");

        // exceeding amount of the transaction, sent to the leftovers recipient
        let leftover_amount = args
            .inputs
            .iter()
            .map(|input| input.amount.to_sat())
            .sum::<u64>()
            .checked_sub(reveal_balance)
            .and_then(|v| v.checked_sub(args.commit_fee.to_sat()))
            .ok_or(OrdError::InsufficientBalance)?;
        debug!("leftover_amount: {leftover_amount}");

        let tx_out = vec![
            TxOut {
                value: Amount::from_sat(reveal_balance),
                script_pubkey: script_output_address.script_pubkey(),
            },
            TxOut {
                value: Amount::from_sat(leftover_amount),
                script_pubkey: args.leftovers_recipient.script_pubkey(),
            },
        ];

        let tx_in = args
            .inputs
            .iter()
            .map(|input| TxIn {
                previous_output: OutPoint {
                    txid: input.id,
                    vout: input.index,
                },
                script_sig: ScriptBuf::new(),
                sequence: Sequence::from_consensus(0xffffffff),
                witness: Witness::new(),
            })
            .collect();

        let unsigned_tx = Transaction {
            version: Version::TWO,
            lock_time: LockTime::ZERO,
            input: tx_in,
            output: tx_out,
        };

        // sign the key-path inputs and update the witnesses
        let own_script_pubkey = self.own_address(network).script_pubkey();
        let tx =
            self.signer
                .sign_funding_transaction(&args.inputs, unsigned_tx, &own_script_pubkey)?;

        Ok(CreateFundingTransaction {
            tx,
            taproot_address: script_output_address,
            redeem_script,
            reveal_balance: Amount::from_sat(reveal_balance),
        })
    }

    /// Creates the reveal transaction: a script-path spend of the funding
    /// output, paying the postage to the recipient and returning any change
    /// above the reveal fee to the same address.
    pub fn build_reveal_transaction(
        &mut self,
        args: RevealTransactionArgs,
    ) -> OrdResult<Transaction> {
        let taproot_payload = self
            .taproot_payload
            .as_ref()
            .ok_or(OrdError::NoTaprootPayload)?;

        let change_amount = args
            .input
            .amount
            .to_sat()
            .checked_sub(POSTAGE)
            .and_then(|v| v.checked_sub(args.reveal_fee.to_sat()))
            .ok_or(OrdError::InsufficientBalance)?;
        debug!("change_amount: {change_amount}");

        let previous_output = OutPoint {
            txid: args.input.id,
            vout: args.input.index,
        };
        let mut tx_out = vec![TxOut {
            value: Amount::from_sat(POSTAGE),
            script_pubkey: args.recipient_address.script_pubkey(),
        }];
        // sub-dust change would be rejected by relay policy
        if change_amount >= POSTAGE {
            tx_out.push(TxOut {
                value: Amount::from_sat(change_amount),
                script_pubkey: args.recipient_address.script_pubkey(),
            });
        }
        let tx_in = vec![TxIn {
            previous_output,
            script_sig: ScriptBuf::new(),
            sequence: Sequence::from_consensus(0xffffffff),
            witness: Witness::new(),
        }];

        let unsigned_tx = Transaction {
            version: Version::TWO,
            lock_time: LockTime::ZERO,
            input: tx_in,
            output: tx_out,
        };

        self.signer
            .sign_reveal_transaction_schnorr(taproot_payload, &args.redeem_script, unsigned_tx)
    }

    /// Generate the redeem script committing to the inscription.
    fn generate_redeem_script<T>(&self, inscription: &T) -> OrdResult<ScriptBuf>
    where
        T: Inscription,
    {
        let builder = ScriptBuilder::new()
            .push_slice(self.public_key.serialize())
            .push_opcode(opcodes::all::OP_CHECKSIG);

        Ok(inscription
            .append_reveal_script_to_builder(builder)?
            .into_script())
    }
}

/// Unspent transaction output to be used as input of a transaction
#[derive(Debug, Clone)]
pub struct Utxo {
    pub id: Txid,
    pub index: u32,
    pub amount: Amount,
}
