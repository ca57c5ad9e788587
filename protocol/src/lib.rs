// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # dexkit — Core Library
//!
//! Wallet-side plumbing for decentralized exchanges: build a transaction
//! from payment targets, sign it, submit it, and let the UI (or whoever
//! else is interested) react to every step along the way.
//!
//! dexkit does not sign or talk to the network itself. A
//! [`WalletProvider`](wallet::WalletProvider) does that; dexkit keeps the
//! books on what happened and tells the listeners.
//!
//! ## Architecture
//!
//! - **transaction** — The lifecycle state machine and its observers.
//! - **wallet** — The provider contract, plus a scripted mock provider.
//! - **datum** — Datum definitions and the builder that fills them.
//! - **definitions** — Bundled datum definitions per exchange.
//! - **config** — Fixed failure reasons and definition constants.
//!
//! ## Quick Tour
//!
//! ```no_run
//! use std::sync::Arc;
//! use dexkit_protocol::transaction::{AddressType, DexTransaction, PayToAddress};
//! use dexkit_protocol::wallet::MockWalletProvider;
//!
//! # async fn run() {
//! let mut tx = DexTransaction::new(Arc::new(MockWalletProvider::succeed_all()));
//! tx.on_error(|t| eprintln!("failed: {:?}", t.error()))
//!     .on_submitted(|t| println!("submitted {:?}", t.hash()));
//!
//! let payment = PayToAddress::new("addr_test1...", AddressType::Base).with_lovelace(2_000_000);
//! tx.attach_payments(&[payment]).await.unwrap();
//! tx.sign().await.unwrap();
//! tx.submit().await.unwrap();
//! # }
//! ```

pub mod config;
pub mod datum;
pub mod definitions;
pub mod transaction;
pub mod wallet;
