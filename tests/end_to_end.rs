//! End-to-end tests for hint execution
//!
//! These tests drive the complete workflow:
//! 1. Describe a program's hints as a JSON hint table
//! 2. Load it into a `HintRunner`, parsing every reference
//! 3. Run hints at program counters against a VM
//! 4. Check memory, scopes and reported errors

use hintvm_core::{Felt, HintCode, HintDescriptor, HintTable, Relocatable};
use hintvm_runtime::{HintRunner, MemoryError, RuntimeError, VMConfig, VirtualMachine};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn traced_vm() -> VirtualMachine {
    VirtualMachine::new(VMConfig {
        trace: true,
        ..VMConfig::default()
    })
    .unwrap()
}

// ============================================================================
// Memcpy loop
// ============================================================================

const MEMCPY_TABLE: &str = r#"{
    "hints": {
        "0": [
            { "code": "MemcpyEnterScope",
              "references": { "starkware.cairo.common.memcpy.memcpy.len": "[cast(fp + (-3), felt*)]" } }
        ],
        "5": [
            { "code": "MemcpyContinueCopying",
              "references": { "starkware.cairo.common.memcpy.memcpy.continue_copying": "[cast(ap + (-1), felt*)]",
                              "output": "[cast(ap + (-1), felt*)]" } }
        ],
        "8": [
            { "code": "VmExitScope" }
        ]
    }
}"#;

#[test]
fn test_memcpy_loop_from_json_table() {
    init_tracing();
    let table = HintTable::from_json(MEMCPY_TABLE).unwrap();
    let mut runner = HintRunner::from_table(&table).unwrap();
    assert_eq!(runner.hint_count(), 3);

    let mut vm = traced_vm();
    // Frame: [fp - 3] = len = 4
    vm.memory.write(Relocatable::new(1, 0), 4u64).unwrap();
    vm.set_fp(Relocatable::new(1, 3));
    vm.set_ap(Relocatable::new(1, 3));

    runner.run_hint(&mut vm, 0).unwrap();

    let mut flags = Vec::new();
    loop {
        // Each iteration the program advances ap past the flag cell
        vm.set_ap(vm.ap().add_usize(1).unwrap());
        runner.run_hint(&mut vm, 5).unwrap();
        let flag = vm.memory.read_felt(vm.ap().offset_by(-1).unwrap()).unwrap();
        flags.push(flag.clone());
        if flag.is_one() {
            break;
        }
    }
    runner.run_hint(&mut vm, 8).unwrap();

    assert_eq!(
        flags,
        vec![Felt::zero(), Felt::zero(), Felt::zero(), Felt::one()]
    );
    assert_eq!(runner.context().scope_manager.depth(), 1);
    assert_eq!(runner.history().len(), 6);
    assert_eq!(runner.history()[0], (0, "MemcpyEnterScope".to_string()));
    assert_eq!(runner.history()[5], (8, "VMExitScope".to_string()));
}

#[test]
fn test_pc_without_hints_is_noop() {
    let table = HintTable::from_json(MEMCPY_TABLE).unwrap();
    let mut runner = HintRunner::from_table(&table).unwrap();
    let mut vm = traced_vm();

    runner.run_hint(&mut vm, 1).unwrap();
    assert!(runner.history().is_empty());
    assert_eq!(vm.memory.segment_len(1).unwrap(), 0);
}

// ============================================================================
// SHA-256 batch
// ============================================================================

#[test]
fn test_sha256_batch_then_finalize() {
    init_tracing();
    let mut table = HintTable::new();
    table.add(
        10,
        HintDescriptor::new(HintCode::PackedSha256)
            .with_reference("sha256_start", "[cast(fp + (-4), felt**)]")
            .with_reference("output", "[cast(fp + (-3), felt**)]"),
    );
    table.add(
        20,
        HintDescriptor::new(HintCode::FinalizeSha256)
            .with_reference("sha256_ptr_end", "[cast(fp + (-2), felt**)]"),
    );
    let mut runner = HintRunner::from_table(&table).unwrap();

    let mut vm = traced_vm();
    let batch = vm.memory.allocate_segment().unwrap();
    // First instance: zero block, IV, output slot
    vm.memory.write_range(batch, [0u64; 16]).unwrap();
    let output = batch.add_usize(24).unwrap();
    let ptr_end = batch.add_usize(32).unwrap();

    vm.memory.write(Relocatable::new(1, 0), batch).unwrap();
    vm.memory.write(Relocatable::new(1, 1), output).unwrap();
    vm.memory.write(Relocatable::new(1, 2), ptr_end).unwrap();
    vm.set_fp(Relocatable::new(1, 4));

    runner.run_hint(&mut vm, 10).unwrap();
    runner.run_hint(&mut vm, 20).unwrap();

    // The digest of the real instance equals the digest repeated in the padding
    for i in 0..8 {
        assert_eq!(
            vm.memory.read_felt(output.add_usize(i).unwrap()).unwrap(),
            vm.memory.read_felt(ptr_end.add_usize(24 + i).unwrap()).unwrap()
        );
    }
    assert_eq!(vm.memory.segment_len(batch.segment_index).unwrap(), 32 + 192);
    assert_eq!(
        vm.memory.read_felt(ptr_end.add_usize(16).unwrap()).unwrap(),
        Felt::from(1779033703u64)
    );
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_run_error_names_hint_and_reason() {
    let mut table = HintTable::new();
    table.add(0, HintDescriptor::new(HintCode::VmEnterScope));
    table.add(1, HintDescriptor::new(HintCode::VmExitScope));
    table.add(1, HintDescriptor::new(HintCode::VmExitScope));
    let mut runner = HintRunner::from_table(&table).unwrap();
    let mut vm = traced_vm();

    runner.run_hint(&mut vm, 0).unwrap();
    let err = runner.run_hint(&mut vm, 1).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("VMExitScope"), "{message}");
    assert!(message.contains("cannot exit the last scope"), "{message}");
    // The first exit ran, the second failed
    assert_eq!(runner.history().len(), 3);
}

#[test]
fn test_failed_hint_keeps_earlier_writes() {
    let mut table = HintTable::new();
    table.add(
        0,
        HintDescriptor::new(HintCode::FinalizeSha256)
            .with_reference("sha256_ptr_end", "[cast(fp + (-1), felt**)]"),
    );
    let mut runner = HintRunner::from_table(&table).unwrap();

    let mut vm = traced_vm();
    let padding = vm.memory.allocate_segment().unwrap();
    // A cell inside the padding region is already taken
    vm.memory.write(padding.add_usize(40).unwrap(), 123u64).unwrap();
    vm.memory.write(Relocatable::new(1, 0), padding).unwrap();
    vm.set_fp(Relocatable::new(1, 1));

    let err = runner.run_hint(&mut vm, 0).unwrap_err();
    match &err {
        RuntimeError::Hint { name, source } => {
            assert_eq!(name, "FinalizeSha256");
            assert!(matches!(
                **source,
                RuntimeError::Memory(MemoryError::WriteOnceViolation { .. })
            ));
        }
        other => panic!("Expected hint failure, got {other:?}"),
    }

    // Cells 0..40 were written before the collision and are not rolled back
    for offset in 0..40 {
        assert!(vm.memory.peek(padding.add_usize(offset).unwrap()).is_some());
    }
    assert_eq!(
        vm.memory.read_felt(padding.add_usize(40).unwrap()).unwrap(),
        Felt::from(123u64)
    );
    assert!(vm.memory.peek(padding.add_usize(41).unwrap()).is_none());
}

#[test]
fn test_segment_limit_surfaces_from_alloc() {
    let mut table = HintTable::new();
    table.add(0, HintDescriptor::new(HintCode::AllocSegment));
    let mut runner = HintRunner::from_table(&table).unwrap();

    let mut vm = VirtualMachine::new(VMConfig {
        max_segments: 3,
        ..VMConfig::default()
    })
    .unwrap();

    runner.run_hint(&mut vm, 0).unwrap();
    vm.set_ap(vm.ap().add_usize(1).unwrap());

    let err = runner.run_hint(&mut vm, 0).unwrap_err();
    assert_eq!(
        err.to_string(),
        "hint AllocSegment failed: Memory error: Segment limit exceeded: 3"
    );
}

#[test]
fn test_malformed_reference_rejected_at_load() {
    let document = r#"{
        "hints": {
            "0": [ { "code": "MemcpyEnterScope",
                     "references": { "len": "[cast(fp + (-3) felt*)]" } } ]
        }
    }"#;
    let table = HintTable::from_json(document).unwrap();

    match HintRunner::from_table(&table) {
        Err(err) => {
            let message = err.to_string();
            assert!(message.starts_with("hint MemcpyEnterScope failed"), "{message}");
            assert!(message.contains("Syntax error at position"), "{message}");
        }
        Ok(_) => panic!("Expected load failure"),
    }
}
