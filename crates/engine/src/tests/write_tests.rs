use super::helpers::*;
use crate::*;
use anyhow::Result;
use std::cell::Cell;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

// --------------------- Existing output ---------------------

#[test]
fn declined_overwrite_leaves_output_untouched() -> Result<()> {
    let dir = tempdir()?;
    let a = write_input(dir.path(), "a.set", Endianness::Big, &tagged_entries(1, 2));
    let b = write_input(dir.path(), "b.set", Endianness::Big, &tagged_entries(2, 2));
    let out = write_raw(dir.path(), "out.set", b"precious bytes");

    let asked = Cell::new(0);
    let err = merge(&[a, b], &out, Endianness::Big, OverwritePolicy::Prompt, |p: &Path| {
        assert_eq!(p, out.as_path());
        asked.set(asked.get() + 1);
        false
    })
    .unwrap_err();

    assert!(matches!(err, MergeError::UserAborted { .. }));
    assert_eq!(asked.get(), 1);
    assert_eq!(fs::read(&out)?, b"precious bytes");
    Ok(())
}

#[test]
fn accepted_overwrite_replaces_output() -> Result<()> {
    let dir = tempdir()?;
    let a = write_input(dir.path(), "a.set", Endianness::Big, &tagged_entries(1, 1));
    let b = write_input(dir.path(), "b.set", Endianness::Big, &tagged_entries(2, 1));
    let out = write_raw(dir.path(), "out.set", &[0xee; 4096]);

    merge(&[a, b], &out, Endianness::Big, OverwritePolicy::Prompt, |_: &Path| true)?;

    let (count, body) = split_output(&out);
    assert_eq!(count, [0, 0, 0, 2]);
    assert_eq!(body.len(), 64);
    Ok(())
}

#[test]
fn force_policy_never_asks() -> Result<()> {
    let dir = tempdir()?;
    let a = write_input(dir.path(), "a.set", Endianness::Big, &tagged_entries(1, 1));
    let b = write_input(dir.path(), "b.set", Endianness::Big, &tagged_entries(2, 1));
    let out = write_raw(dir.path(), "out.set", b"old");

    merge(&[a, b], &out, Endianness::Big, OverwritePolicy::Force, never_asked)?;

    let (count, _) = split_output(&out);
    assert_eq!(count, [0, 0, 0, 2]);
    Ok(())
}

#[test]
fn no_prompt_when_output_is_new() -> Result<()> {
    let dir = tempdir()?;
    let a = write_input(dir.path(), "a.set", Endianness::Big, &tagged_entries(1, 1));
    let b = write_input(dir.path(), "b.set", Endianness::Big, &tagged_entries(2, 1));

    merge(
        &[a, b],
        &dir.path().join("fresh.set"),
        Endianness::Big,
        OverwritePolicy::Prompt,
        never_asked,
    )?;
    Ok(())
}

#[test]
fn input_errors_come_before_the_prompt() -> Result<()> {
    let dir = tempdir()?;
    let a = write_input(dir.path(), "a.set", Endianness::Big, &tagged_entries(1, 1));
    let out = write_raw(dir.path(), "out.set", b"keep");

    let err = merge(
        &[a, dir.path().join("missing.set")],
        &out,
        Endianness::Big,
        OverwritePolicy::Prompt,
        never_asked,
    )
    .unwrap_err();

    assert!(matches!(err, MergeError::Set(_)));
    assert_eq!(fs::read(&out)?, b"keep");
    Ok(())
}

#[test]
fn output_can_be_one_of_the_inputs() -> Result<()> {
    let dir = tempdir()?;
    let a = write_input(dir.path(), "a.set", Endianness::Big, &tagged_entries(1, 2));
    let b = write_input(dir.path(), "b.set", Endianness::Big, &tagged_entries(2, 1));

    // inputs are fully buffered before the output is truncated
    merge(&[a.clone(), b], &a, Endianness::Big, OverwritePolicy::Force, never_asked)?;

    let (count, body) = split_output(&a);
    assert_eq!(count, [0, 0, 0, 3]);
    let mut expected = tagged_entries(1, 2);
    expected.extend(tagged_entries(2, 1));
    assert_eq!(body, concat(&expected));
    Ok(())
}

// --------------------- Write failures ---------------------

#[test]
fn unwritable_output_is_an_io_error() -> Result<()> {
    let dir = tempdir()?;
    let a = write_input(dir.path(), "a.set", Endianness::Big, &tagged_entries(1, 1));
    let b = write_input(dir.path(), "b.set", Endianness::Big, &tagged_entries(2, 1));
    let out = dir.path().join("no_such_dir").join("out.set");

    let err = merge(&[a, b], &out, Endianness::Big, OverwritePolicy::Force, never_asked)
        .unwrap_err();

    match err {
        MergeError::Io { path, .. } => assert_eq!(path, out),
        other => panic!("expected Io, got {other:?}"),
    }
    Ok(())
}

#[test]
fn output_exists_reports_files_and_missing_paths() -> Result<()> {
    let dir = tempdir()?;
    let present = write_raw(dir.path(), "present", b"x");
    assert!(output_exists(&present));
    assert!(!output_exists(&dir.path().join("absent")));
    Ok(())
}
