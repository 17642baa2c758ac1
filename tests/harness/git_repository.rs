use std::path::Path;

pub(crate) fn git(repo_dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(repo_dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub(crate) fn configure_user(repo_dir: &Path) {
    git(repo_dir, &["config", "user.email", "test@example.com"]);
    git(repo_dir, &["config", "user.name", "Test User"]);
}

pub(crate) fn commit_all(repo_dir: &Path, message: &str) {
    git(repo_dir, &["add", "."]);
    git(repo_dir, &["commit", "-m", message]);
}

/// Create a bare repository at `bare` whose `main` holds a single README commit.
pub(crate) fn init_seeded_bare_repo(scratch: &Path, bare: &Path) {
    let seed = scratch.join("seed");
    std::fs::create_dir_all(&seed).expect("failed to create seed dir");
    git(&seed, &["init", "--initial-branch=main"]);
    configure_user(&seed);
    std::fs::write(seed.join("README.md"), "# Catalog\n").expect("failed to write README");
    commit_all(&seed, "Initial commit");

    std::fs::create_dir_all(bare.parent().expect("bare repo has parent"))
        .expect("failed to create bare parent");
    let bare_str = bare.to_string_lossy();
    git(scratch, &["clone", "--bare", "--quiet", "seed", bare_str.as_ref()]);
}

/// Commit subjects on the bare repository's HEAD, newest first.
pub(crate) fn log_subjects(bare: &Path) -> Vec<String> {
    git(bare, &["log", "--format=%s"]).lines().map(str::to_string).collect()
}

/// File content at HEAD of a bare repository, if the path exists there.
pub(crate) fn show_file(bare: &Path, path: &str) -> Option<String> {
    let output = std::process::Command::new("git")
        .args(["show", &format!("HEAD:{}", path)])
        .current_dir(bare)
        .output()
        .expect("failed to run git show");
    output.status.success().then(|| String::from_utf8_lossy(&output.stdout).to_string())
}
