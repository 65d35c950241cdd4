use crate::fixtures::*;

#[cfg(unix)]
#[test]
fn test_update_ignores_prompt_and_never_calls_assistant() -> TestResult {
    let install = Install::without_instructions()?;
    install.install_assistant(RECORDING_ASSISTANT)?;

    let output = install.b_output(&["--update", "Design a cache"])?;
    assert!(
        output.status.success(),
        "update must not fail the process: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Updating "), "stdout: {stdout}");
    assert!(
        stdout.contains("Update failed:"),
        "a non-repository install should report a failed pull: {stdout}"
    );
    assert!(!stdout.contains("Processing prompt"), "stdout: {stdout}");
    assert!(!install.assistant_was_invoked());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_update_after_init_still_runs_the_update() -> TestResult {
    let install = Install::new()?;

    let output = install.b_output(&["init", "--update"])?;
    assert!(
        output.status.success(),
        "init --update should parse and run: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Updating "), "stdout: {stdout}");
    assert!(!stdout.contains("Linked "), "init must not run: {stdout}");
    assert!(!install.home().join(".claude").exists());
    Ok(())
}

#[test]
fn test_update_without_git_reports_and_succeeds() -> TestResult {
    let install = Install::new()?;

    let mut cmd = install.b_cmd_isolated_path();
    cmd.arg("--update");
    let output = cmd.output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Error: git command not found. Please make sure git is installed."),
        "stdout: {stdout}"
    );
    Ok(())
}

#[test]
fn test_update_pulls_new_commits_from_origin() -> TestResult {
    if !git_available() {
        eprintln!("skipping: git not available");
        return Ok(());
    }

    let origin = OriginRepo::new()?;
    let first = origin.commit_file(INSTRUCTION_FILE, "RULES v1\n", "initial instructions")?;
    let install = Install::cloned_from(origin.path())?;
    assert_eq!(fs::read_to_string(install.instruction_path())?, "RULES v1\n");

    let second = origin.commit_file(INSTRUCTION_FILE, "RULES v2\n", "tighten rules")?;

    let output = install.b_output(&["--update"])?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Update successful!"), "stdout: {stdout}");
    assert!(
        stdout.contains(&format!("Updated {}..{}", short(first), short(second))),
        "stdout should show the HEAD change: {stdout}"
    );
    assert_eq!(fs::read_to_string(install.instruction_path())?, "RULES v2\n");
    Ok(())
}

#[test]
fn test_update_when_already_current_prints_no_head_change() -> TestResult {
    if !git_available() {
        eprintln!("skipping: git not available");
        return Ok(());
    }

    let origin = OriginRepo::new()?;
    origin.commit_file(INSTRUCTION_FILE, "RULES\n", "initial instructions")?;
    let install = Install::cloned_from(origin.path())?;

    let output = install.b_output(&["--update"])?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Update successful!"), "stdout: {stdout}");
    assert!(!stdout.contains("Updated "), "stdout: {stdout}");
    Ok(())
}
