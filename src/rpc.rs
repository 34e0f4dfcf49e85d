//! Blockchain-explorer HTTP client (Esplora-compatible REST API).

use std::str::FromStr;
use std::time::Duration;

use bitcoin::{Address, Amount, BlockHash, Network, Transaction, Txid};
use log::{debug, info};
use serde::Deserialize;

use crate::utils::constants::UTXO_POLL_INTERVAL_SECS;
use crate::wallet::Utxo;
use crate::{OrdError, OrdResult};

/// An unspent output as reported by the explorer.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUtxo {
    pub txid: Txid,
    pub vout: u32,
    pub value: u64,
    pub status: ApiUtxoStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiUtxoStatus {
    pub confirmed: bool,
    pub block_height: Option<u64>,
    pub block_hash: Option<BlockHash>,
    pub block_time: Option<u64>,
}

impl From<&ApiUtxo> for Utxo {
    fn from(utxo: &ApiUtxo) -> Self {
        Self {
            id: utxo.txid,
            index: utxo.vout,
            amount: Amount::from_sat(utxo.value),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiTransaction {
    vout: Vec<ApiVout>,
}

#[derive(Debug, Deserialize)]
struct ApiVout {
    value: u64,
}

/// Client for a mempool.space-style explorer REST API.
pub struct EsploraClient {
    client: reqwest::Client,
    base_url: String,
}

impl EsploraClient {
    pub fn new(network: Network) -> Self {
        let network_str = match network {
            Network::Testnet => "/testnet",
            Network::Signet => "/signet",
            _ => "",
        };

        Self {
            client: reqwest::Client::new(),
            base_url: format!("https://mempool.space{network_str}/api"),
        }
    }

    /// `GET /address/{address}/utxo`
    pub async fn get_address_utxos(&self, address: &Address) -> OrdResult<Vec<ApiUtxo>> {
        let url = format!("{}/address/{address}/utxo", self.base_url);
        let utxos = self.client.get(&url).send().await?.json().await?;
        debug!("utxos for {address}: {utxos:?}");

        Ok(utxos)
    }

    /// Polls the explorer until the address has at least one UTXO. The first
    /// request error aborts the poll.
    pub async fn wait_for_utxos(&self, address: &Address) -> OrdResult<Vec<ApiUtxo>> {
        loop {
            let utxos = self.get_address_utxos(address).await?;
            if !utxos.is_empty() {
                return Ok(utxos);
            }
            info!("waiting for UTXOs on {address}...");
            tokio::time::sleep(Duration::from_secs(UTXO_POLL_INTERVAL_SECS)).await;
        }
    }

    /// `GET /tx/{txid}/hex`
    pub async fn get_tx_hex(&self, txid: &Txid) -> OrdResult<String> {
        let url = format!("{}/tx/{txid}/hex", self.base_url);
        let hex = self.client.get(&url).send().await?.text().await?;

        Ok(hex)
    }

    /// Resolves `(txid, vout)` outpoints into spendable UTXOs by fetching the
    /// referenced transactions from the explorer.
    pub async fn utxos_from_outpoints(&self, outpoints: &[(Txid, u32)]) -> OrdResult<Vec<Utxo>> {
        let mut utxos = Vec::with_capacity(outpoints.len());
        for (txid, index) in outpoints {
            let url = format!("{}/tx/{txid}", self.base_url);
            let tx: ApiTransaction = self.client.get(&url).send().await?.json().await?;
            let output = tx
                .vout
                .get(*index as usize)
                .ok_or(OrdError::InputNotFound(*index as usize))?;

            utxos.push(Utxo {
                id: *txid,
                index: *index,
                amount: Amount::from_sat(output.value),
            });
        }

        Ok(utxos)
    }

    /// `POST /tx`
    pub async fn broadcast_transaction(&self, transaction: &Transaction) -> OrdResult<Txid> {
        let url = format!("{}/tx", self.base_url);
        let tx_hex = hex::encode(bitcoin::consensus::serialize(transaction));
        debug!("tx_hex ({}): {tx_hex}", tx_hex.len());

        let result = self.client.post(&url).body(tx_hex).send().await?;

        if result.status().is_success() {
            let txid = result.text().await?;
            debug!("txid: {txid}");
            Ok(Txid::from_str(&txid)?)
        } else {
            Err(OrdError::Broadcast(result.text().await?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_deserialize_address_utxos() {
        let json = r#"[
            {
                "txid": "7402984dae838f6700b561f425aacac82b91bc5924fb853631af65f0431cc76a",
                "vout": 0,
                "status": {
                    "confirmed": true,
                    "block_height": 2580001,
                    "block_hash": "000000000000001b9bc5a82f9ca9a4ea94a8b1b57b6bbb2c31c4089274b9e0b0",
                    "block_time": 1706000000
                },
                "value": 546
            },
            {
                "txid": "ea4303aaa2c7939931a2ba129c9fc915d1905d441f2a74b6cd694c71665c7682",
                "vout": 2,
                "status": { "confirmed": false },
                "value": 129454
            }
        ]"#;

        let utxos: Vec<ApiUtxo> = serde_json::from_str(json).unwrap();
        assert_eq!(utxos.len(), 2);
        assert!(utxos[0].status.confirmed);
        assert_eq!(utxos[0].value, 546);
        assert!(!utxos[1].status.confirmed);
        assert!(utxos[1].status.block_height.is_none());

        let utxo = Utxo::from(&utxos[1]);
        assert_eq!(utxo.index, 2);
        assert_eq!(utxo.amount, Amount::from_sat(129_454));
    }

    #[test]
    fn test_should_deserialize_transaction_outputs() {
        let json = r#"{
            "txid": "ea4303aaa2c7939931a2ba129c9fc915d1905d441f2a74b6cd694c71665c7682",
            "vout": [
                { "scriptpubkey": "0016", "value": 546 },
                { "scriptpubkey": "0016", "value": 129454 }
            ]
        }"#;

        let tx: ApiTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.vout.len(), 2);
        assert_eq!(tx.vout[1].value, 129_454);
    }

    #[test]
    fn test_should_build_base_url_for_network() {
        assert_eq!(
            EsploraClient::new(Network::Testnet).base_url,
            "https://mempool.space/testnet/api"
        );
        assert_eq!(
            EsploraClient::new(Network::Bitcoin).base_url,
            "https://mempool.space/api"
        );
    }
}
