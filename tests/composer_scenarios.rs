//! End-to-end composition scenarios against the mock ledger

use mintforge::composer::MintComposer;
use mintforge::extension::{
    ExtensionKind, MetadataPointerParams, StepKind, TransferFeeParams, TransferHookParams,
};
use mintforge::ledger::mock::MockLedger;
use mintforge::metadata::MetadataSpec;
use mintforge::ComposeError;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn fee_params() -> TransferFeeParams {
    TransferFeeParams {
        fee_basis_points: 100,
        maximum_fee: 1_000_000_000,
        fee_authority: Some(Pubkey::new_unique()),
        withdraw_authority: Some(Pubkey::new_unique()),
    }
}

#[tokio::test]
async fn conflicting_kinds_fail_before_any_ledger_work() {
    init_logging();
    // Scenario: non-transferable + transfer fee
    let ledger = MockLedger::new();
    let payer = Pubkey::new_unique();
    let err = MintComposer::new(9, Pubkey::new_unique())
        .with_non_transferable()
        .unwrap()
        .with_transfer_fee(fee_params())
        .unwrap()
        .plan(&ledger, &payer)
        .await
        .unwrap_err();

    let msg = err.to_string();
    assert_eq!(err.category(), "compatibility");
    assert!(msg.contains("non-transferable"), "{msg}");
    assert!(msg.contains("transfer-fee"), "{msg}");
    assert!(ledger.submissions().is_empty());
}

#[tokio::test]
async fn every_conflict_is_reported_in_one_pass() {
    init_logging();
    let ledger = MockLedger::new();
    let err = MintComposer::new(9, Pubkey::new_unique())
        .with_non_transferable()
        .unwrap()
        .with_transfer_fee(fee_params())
        .unwrap()
        .with_transfer_hook(TransferHookParams {
            program_id: Pubkey::new_unique(),
            authority: None,
        })
        .unwrap()
        .plan(&ledger, &Pubkey::new_unique())
        .await
        .unwrap_err();

    match err {
        ComposeError::Compatibility(violations) => assert_eq!(violations.len(), 2),
        other => panic!("expected compatibility error, got {other}"),
    }
}

#[tokio::test]
async fn three_extension_plan_orders_declarations_canonically() {
    init_logging();
    // Scenario: transfer fee + transfer hook + permanent delegate
    let ledger = MockLedger::new();
    let plan = MintComposer::new(9, Pubkey::new_unique())
        .with_transfer_fee(fee_params())
        .unwrap()
        .with_transfer_hook(TransferHookParams {
            program_id: Pubkey::new_unique(),
            authority: None,
        })
        .unwrap()
        .with_permanent_delegate(Pubkey::new_unique())
        .unwrap()
        .plan(&ledger, &Pubkey::new_unique())
        .await
        .unwrap();

    assert_eq!(
        plan.step_kinds(),
        vec![
            StepKind::Allocate,
            StepKind::Declare(ExtensionKind::TransferFee),
            StepKind::Declare(ExtensionKind::PermanentDelegate),
            StepKind::Declare(ExtensionKind::TransferHook),
            StepKind::InitializeBase,
        ]
    );

    let instructions = plan.instructions();
    assert_eq!(instructions[0].program_id, solana_sdk::system_program::id());
    for ix in &instructions[1..] {
        assert_eq!(ix.program_id, spl_token_2022::id());
    }
}

#[tokio::test]
async fn metadata_plan_ends_with_content_then_field_updates() {
    init_logging();
    // Scenario: metadata with 2 additional fields + transfer fee
    let ledger = MockLedger::new();
    let plan = MintComposer::new(9, Pubkey::new_unique())
        .with_transfer_fee(fee_params())
        .unwrap()
        .with_metadata(
            MetadataSpec::new("Forge Token", "FORGE", "https://example.org/forge.json")
                .with_field("tier", "gold")
                .with_field("season", "2026"),
        )
        .unwrap()
        .plan(&ledger, &Pubkey::new_unique())
        .await
        .unwrap();

    assert_eq!(
        plan.step_kinds(),
        vec![
            StepKind::Allocate,
            StepKind::Declare(ExtensionKind::TransferFee),
            StepKind::Declare(ExtensionKind::MetadataPointer),
            StepKind::InitializeBase,
            StepKind::InitializeMetadata,
            StepKind::UpdateMetadataField(0),
            StepKind::UpdateMetadataField(1),
        ]
    );

    // Metadata bytes are funded but not allocated up front.
    let layout = plan.layout();
    assert!(layout.metadata_size > 0);
    assert_eq!(
        layout.allocated_size(),
        layout.total_size - layout.metadata_size
    );
    assert!(layout.required_funding > 0);
}

#[tokio::test]
async fn identical_configurations_plan_identically_modulo_identity() {
    init_logging();
    // Scenario: two independent plans of the same configuration
    let ledger = MockLedger::new();
    let authority = Pubkey::new_unique();
    let payer = Pubkey::new_unique();
    let build = || {
        MintComposer::new(6, authority)
            .with_transfer_fee(fee_params())
            .unwrap()
            .with_mint_close_authority(authority)
            .unwrap()
    };

    let first = build().plan(&ledger, &payer).await.unwrap();
    let second = build().plan(&ledger, &payer).await.unwrap();

    assert_eq!(first.step_kinds(), second.step_kinds());
    assert_eq!(first.layout(), second.layout());
    assert_ne!(first.mint_address(), second.mint_address());
}

#[tokio::test]
async fn execute_submits_one_atomic_bundle_with_mint_as_cosigner() {
    init_logging();
    let ledger = MockLedger::new();
    let payer = Keypair::new();
    let receipt = MintComposer::new(9, payer.pubkey())
        .with_permanent_delegate(payer.pubkey())
        .unwrap()
        .execute(&ledger, &payer, &[])
        .await
        .unwrap();

    let submissions = ledger.submissions();
    assert_eq!(submissions.len(), 1);
    let bundle = &submissions[0];
    assert_eq!(bundle.payer, payer.pubkey());
    assert!(bundle.signer_keys.contains(&payer.pubkey()));
    assert!(bundle.signer_keys.contains(&receipt.mint));
    // allocate + declare + base
    assert_eq!(bundle.instructions.len(), 3);
}

#[tokio::test]
async fn rejected_submission_is_terminal_and_verbatim() {
    init_logging();
    let ledger = MockLedger::rejecting("attempt to debit an account but found no record of a prior credit");
    let payer = Keypair::new();
    let err = MintComposer::new(9, payer.pubkey())
        .with_non_transferable()
        .unwrap()
        .execute(&ledger, &payer, &[])
        .await
        .unwrap_err();

    assert_eq!(err.category(), "submission");
    assert!(!err.is_retryable());
    assert!(err.to_string().contains("no record of a prior credit"));
}

#[tokio::test]
async fn default_frozen_without_freeze_authority_is_rejected() {
    init_logging();
    let ledger = MockLedger::new();
    let err = MintComposer::new(9, Pubkey::new_unique())
        .with_default_account_state(true)
        .unwrap()
        .plan(&ledger, &Pubkey::new_unique())
        .await
        .unwrap_err();
    assert_eq!(err.category(), "config");
}

#[tokio::test]
async fn default_frozen_with_freeze_authority_plans() {
    init_logging();
    let ledger = MockLedger::new();
    let authority = Pubkey::new_unique();
    let plan = MintComposer::new(9, authority)
        .freeze_authority(authority)
        .with_default_account_state(true)
        .unwrap()
        .plan(&ledger, &Pubkey::new_unique())
        .await
        .unwrap();
    assert!(plan
        .step_kinds()
        .contains(&StepKind::Declare(ExtensionKind::DefaultAccountState)));
}

#[tokio::test]
async fn external_pointer_plans_without_content_steps() {
    init_logging();
    let ledger = MockLedger::new();
    let plan = MintComposer::new(9, Pubkey::new_unique())
        .with_metadata_pointer(MetadataPointerParams {
            metadata_address: Pubkey::new_unique(),
            authority: None,
        })
        .unwrap()
        .plan(&ledger, &Pubkey::new_unique())
        .await
        .unwrap();
    assert_eq!(
        plan.step_kinds(),
        vec![
            StepKind::Allocate,
            StepKind::Declare(ExtensionKind::MetadataPointer),
            StepKind::InitializeBase,
        ]
    );
    assert_eq!(plan.layout().metadata_size, 0);
}

#[tokio::test]
async fn submit_rejects_a_mismatched_payer() {
    init_logging();
    let ledger = MockLedger::new();
    let planned_for = Keypair::new();
    let someone_else = Keypair::new();
    let plan = MintComposer::new(9, planned_for.pubkey())
        .with_non_transferable()
        .unwrap()
        .plan(&ledger, &planned_for.pubkey())
        .await
        .unwrap();
    let err = plan.submit(&ledger, &someone_else, &[]).await.unwrap_err();
    assert_eq!(err.category(), "config");
    assert!(ledger.submissions().is_empty());
}
