use std::str::FromStr;

use anyhow::Context;
use argh::FromArgs;
use bitcoin::{Address, Network, PrivateKey, Txid};
use log::{debug, info};
use ord_reinscribe::rpc::EsploraClient;
use ord_reinscribe::utils::fees::Fees;
use ord_reinscribe::{
    Bitmap, CreateFundingTransactionArgs, ReinscriptionBuilder, RevealTransactionArgs, Utxo,
};

#[derive(FromArgs, Debug)]
#[argh(description = "Reinscribe a parent ordinal and forward it to a recipient")]
struct Args {
    #[argh(option, short = 't')]
    /// recipient address (e.g. tb1ppx220ln489s5wqu8mqgezm7twwpj0avcvle3vclpdkpqvdg3mwqsvydajn)
    to: String,

    #[argh(option, short = 'n')]
    /// network
    network: String,

    #[argh(option, short = 'b', default = "String::from(\"reinscription.bitmap\")")]
    /// bitmap district to inscribe
    district: String,

    #[argh(
        option,
        short = 'm',
        default = "String::from(\"Bitmap Community Parent Ordinal\")"
    )]
    /// description stored in the CBOR metadata
    description: String,

    #[argh(switch, short = 'd')]
    /// dry run, don't send any transaction
    dry_run: bool,

    #[argh(positional)]
    /// wallet utxos to fund the transaction (txid:vout)
    inputs: Vec<String>,
}

fn parse_inputs(inputs: &[String]) -> anyhow::Result<Vec<(Txid, u32)>> {
    inputs
        .iter()
        .map(|input| {
            let (txid, vout) = input
                .split_once(':')
                .with_context(|| format!("invalid input {input}; expected txid:vout"))?;
            Ok((Txid::from_str(txid)?, vout.parse::<u32>()?))
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Args = argh::from_env();

    let network = match args.network.as_str() {
        "testnet" | "test" => Network::Testnet,
        "mainnet" | "prod" => Network::Bitcoin,
        _ => anyhow::bail!("invalid network"),
    };

    let wif = std::env::var("PRIVATE_KEY").context("PRIVATE_KEY is not set")?;
    let private_key = PrivateKey::from_wif(&wif)?;

    let recipient = Address::from_str(&args.to)?.require_network(network)?;
    debug!("recipient: {recipient}");

    let outpoints = parse_inputs(&args.inputs)?;
    anyhow::ensure!(!outpoints.is_empty(), "at least one funding input is required");

    let client = EsploraClient::new(network);
    let inputs = client.utxos_from_outpoints(&outpoints).await?;

    let Fees {
        commit_fee,
        reveal_fee,
    } = Fees::for_network(network);
    info!("commit fee: {commit_fee}, reveal fee: {reveal_fee}");

    let mut builder = ReinscriptionBuilder::new(private_key);
    debug!("wallet address: {}", builder.own_address(network));

    debug!("building funding transaction...");
    let funding = builder.build_funding_transaction(
        network,
        CreateFundingTransactionArgs {
            inputs,
            inscription: Bitmap::parent(args.district, args.description),
            leftovers_recipient: recipient.clone(),
            commit_fee,
            reveal_fee,
        },
    )?;
    info!("sending coins to address {}", funding.taproot_address);

    println!("{}", funding.tx.vsize());
    println!("{}", hex::encode(bitcoin::consensus::serialize(&funding.tx)));

    let reveal_input = if args.dry_run {
        // chain off the unbroadcast funding transaction
        Utxo {
            id: funding.tx.txid(),
            index: 0,
            amount: funding.reveal_balance,
        }
    } else {
        let txid = client.broadcast_transaction(&funding.tx).await?;
        info!("funding transaction broadcast: {txid}");

        let utxos = client.wait_for_utxos(&funding.taproot_address).await?;
        Utxo::from(&utxos[0])
    };

    debug!("building reveal transaction...");
    let reveal = builder.build_reveal_transaction(RevealTransactionArgs {
        input: reveal_input,
        recipient_address: recipient,
        redeem_script: funding.redeem_script,
        reveal_fee,
    })?;

    println!("{}", reveal.vsize());
    println!("{}", hex::encode(bitcoin::consensus::serialize(&reveal)));

    if !args.dry_run {
        let txid = client.broadcast_transaction(&reveal).await?;
        info!("reveal transaction broadcast: {txid}");
    }

    Ok(())
}
