#![cfg(target_os = "linux")]

use crate::fixtures::*;

fn candidate_dirs(install: &Install) -> [PathBuf; 4] {
    let home = install.home();
    let config = install.config_home();
    [
        home.join(".claude/commands"),
        config.join("Claude/commands"),
        home.join(".codeium/windsurf/global_workflows"),
        config.join("Windsurf/global_workflows"),
    ]
}

fn assert_links_to(link: &Path, target: &Path) -> TestResult {
    let meta = fs::symlink_metadata(link)?;
    assert!(
        meta.file_type().is_symlink(),
        "{} should be a symlink",
        link.display()
    );
    assert_eq!(fs::read_link(link)?, target);
    Ok(())
}

#[test]
fn test_init_links_every_candidate_directory() -> TestResult {
    let install = Install::new()?;
    install.install_assistant(RECORDING_ASSISTANT)?;

    let output = install.b_output(&["init"])?;
    assert!(
        output.status.success(),
        "init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    for dir in candidate_dirs(&install) {
        assert_links_to(&dir.join(INSTRUCTION_FILE), &install.instruction_path())?;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Linked ").count(), 4, "stdout: {stdout}");
    assert!(
        stdout.contains(
            "Workflow integration complete: linked b.md into 4 directories for Claude Code and Windsurf."
        ),
        "stdout: {stdout}"
    );
    assert!(!install.assistant_was_invoked());
    Ok(())
}

#[test]
fn test_init_is_idempotent() -> TestResult {
    let install = Install::new()?;

    let first = install.b_output(&["init"])?;
    assert!(first.status.success());
    let second = install.b_output(&["init"])?;
    assert!(second.status.success());

    for dir in candidate_dirs(&install) {
        assert_links_to(&dir.join(INSTRUCTION_FILE), &install.instruction_path())?;
        let entries = fs::read_dir(&dir)?.count();
        assert_eq!(entries, 1, "{} should hold only b.md", dir.display());
    }

    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(!stdout.contains("(created directory)"), "stdout: {stdout}");
    assert!(!stdout.contains("Warning"), "stdout: {stdout}");
    Ok(())
}

#[test]
fn test_init_replaces_an_existing_file() -> TestResult {
    let install = Install::new()?;
    let claude_dir = install.home().join(".claude/commands");
    fs::create_dir_all(&claude_dir)?;
    fs::write(claude_dir.join(INSTRUCTION_FILE), "stale copy")?;

    let output = install.b_output(&["init"])?;
    assert!(output.status.success());

    let link = claude_dir.join(INSTRUCTION_FILE);
    assert_links_to(&link, &install.instruction_path())?;
    assert_eq!(fs::read_to_string(&link)?, DEFAULT_INSTRUCTIONS);
    Ok(())
}

#[test]
fn test_init_warns_and_continues_past_a_blocked_directory() -> TestResult {
    let install = Install::new()?;
    fs::write(install.home().join(".codeium"), "not a directory")?;

    let output = install.b_output(&["init"])?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Warning: could not link"),
        "stdout: {stdout}"
    );
    assert!(
        stdout.contains("linked b.md into 3 directories for Claude Code and Windsurf."),
        "stdout: {stdout}"
    );

    let [claude_home, claude_config, _, windsurf_config] = candidate_dirs(&install);
    for dir in [claude_home, claude_config, windsurf_config] {
        assert_links_to(&dir.join(INSTRUCTION_FILE), &install.instruction_path())?;
    }
    Ok(())
}

#[test]
fn test_init_with_no_usable_directory_still_succeeds() -> TestResult {
    let install = Install::new()?;
    let blocked_home = install.path().join("home-is-a-file");
    fs::write(&blocked_home, "")?;

    let mut cmd = install.b_cmd();
    cmd.env("HOME", &blocked_home)
        .env("XDG_CONFIG_HOME", blocked_home.join(".config"))
        .arg("init");
    let output = cmd.output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.matches("Warning: could not link").count(),
        4,
        "stdout: {stdout}"
    );
    assert!(
        stdout.contains("Warning: no workflow directories were found or created."),
        "stdout: {stdout}"
    );
    assert!(
        stdout.contains(&format!(
            "ln -s {} <workflow-dir>/b.md",
            install.instruction_path().display()
        )),
        "stdout: {stdout}"
    );
    Ok(())
}

#[test]
fn test_init_given_as_escaped_prompt_runs_setup() -> TestResult {
    let install = Install::new()?;
    install.install_assistant(RECORDING_ASSISTANT)?;

    let output = install.b_output(&["--", "init"])?;
    assert!(output.status.success());

    assert!(!install.assistant_was_invoked());
    let [claude_home, ..] = candidate_dirs(&install);
    assert_links_to(&claude_home.join(INSTRUCTION_FILE), &install.instruction_path())?;
    Ok(())
}

#[test]
fn test_init_accepts_modifier_flags_after_it() -> TestResult {
    let install = Install::new()?;
    install.install_assistant(RECORDING_ASSISTANT)?;

    let output = install.b_output(&["init", "-b", "--3"])?;
    assert!(
        output.status.success(),
        "init -b --3 should parse: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!install.assistant_was_invoked());
    let [claude_home, ..] = candidate_dirs(&install);
    assert_links_to(&claude_home.join(INSTRUCTION_FILE), &install.instruction_path())?;
    Ok(())
}

#[test]
fn test_init_without_instructions_warns_about_dangling_links() -> TestResult {
    let install = Install::without_instructions()?;

    let output = install.b_output(&["init"])?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("links will dangle until it exists"),
        "stdout: {stdout}"
    );
    let [claude_home, ..] = candidate_dirs(&install);
    assert_links_to(&claude_home.join(INSTRUCTION_FILE), &install.instruction_path())?;
    Ok(())
}
