//! Integration tests for transaction validation.

use std::sync::Arc;

use alloy::primitives::B256;
use mockall::predicate;
use wallet_tracker::{
	services::{
		blockchain::BlockChainError,
		filter::{RejectReason, TransactionValidator, Validation},
	},
	utils::{
		string_to_b256,
		tests::{chain::ChainBuilder, evm::receipt::ReceiptBuilder, evm::transaction::TransactionBuilder},
	},
};

use crate::integration::mocks::MockEvmClientTrait;

const HASH: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";

fn validator(client: MockEvmClientTrait) -> TransactionValidator<MockEvmClientTrait> {
	TransactionValidator::new(Arc::new(ChainBuilder::new().build()), Arc::new(client))
}

fn expected_hash() -> B256 {
	string_to_b256(HASH).unwrap()
}

#[tokio::test]
async fn test_successful_receipt_is_accepted() {
	let mut client = MockEvmClientTrait::new();
	client
		.expect_get_transaction_receipt()
		.with(predicate::eq(expected_hash()))
		.times(1)
		.returning(|hash| {
			Ok(Some(
				ReceiptBuilder::new().transaction_hash(hash).build(),
			))
		});

	let tx = TransactionBuilder::new().hash(HASH).build();
	let validation = validator(client).validate(&tx).await;

	assert_eq!(
		validation,
		Validation::Accepted {
			hash: expected_hash()
		}
	);
}

#[tokio::test]
async fn test_failed_receipt_is_rejected() {
	let mut client = MockEvmClientTrait::new();
	client
		.expect_get_transaction_receipt()
		.returning(|_| Ok(Some(ReceiptBuilder::new().failed().build())));

	let tx = TransactionBuilder::new().hash(HASH).build();
	let validation = validator(client).validate(&tx).await;

	assert_eq!(validation, Validation::Rejected(RejectReason::Failed));
}

#[tokio::test]
async fn test_receipt_without_status_is_accepted() {
	let mut client = MockEvmClientTrait::new();
	client
		.expect_get_transaction_receipt()
		.returning(|_| Ok(Some(ReceiptBuilder::new().without_status().build())));

	let tx = TransactionBuilder::new().hash(HASH).build();
	assert!(validator(client).is_valid(&tx).await);
}

#[tokio::test]
async fn test_pending_receipt_is_accepted() {
	let mut client = MockEvmClientTrait::new();
	client
		.expect_get_transaction_receipt()
		.returning(|_| Ok(None));

	let tx = TransactionBuilder::new().hash(HASH).build();
	assert!(validator(client).is_valid(&tx).await);
}

#[tokio::test]
async fn test_receipt_error_is_accepted() {
	let mut client = MockEvmClientTrait::new();
	client
		.expect_get_transaction_receipt()
		.returning(|_| Err(BlockChainError::connection_error("429 Too Many Requests")));

	let tx = TransactionBuilder::new().hash(HASH).build();
	assert!(validator(client).is_valid(&tx).await);
}

#[tokio::test]
async fn test_malformed_hash_is_rejected_without_lookup() {
	let mut client = MockEvmClientTrait::new();
	client.expect_get_transaction_receipt().never();

	let tx = TransactionBuilder::new().hash("0x1234").build();
	let validation = validator(client).validate(&tx).await;

	assert_eq!(
		validation,
		Validation::Rejected(RejectReason::MalformedHash("0x1234".to_string()))
	);
}

#[tokio::test]
async fn test_missing_hash_is_rejected_without_lookup() {
	let mut client = MockEvmClientTrait::new();
	client.expect_get_transaction_receipt().never();

	let tx = TransactionBuilder::new().without_hash().build();
	assert!(!validator(client).is_valid(&tx).await);
}
