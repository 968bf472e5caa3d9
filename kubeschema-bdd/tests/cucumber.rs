use anyhow::Context;
use assert_cmd::Command;
use camino::Utf8PathBuf;
use cucumber::{World, given, then, when};
use fs_err as fs;
use kubeschema_bdd::fixture_apis_dir;
use tempfile::TempDir;

#[derive(Debug, Default, World)]
pub struct KubeschemaWorld {
    temp: Option<TempDir>,
    workdir: Option<Utf8PathBuf>,
    apis_dir: Option<Utf8PathBuf>,
    stdout: String,
    stderr: String,
    exit_code: Option<i32>,
}

fn workdir(world: &KubeschemaWorld) -> &Utf8PathBuf {
    world.workdir.as_ref().expect("workdir set")
}

fn run(world: &mut KubeschemaWorld, args: &[String]) -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("kubeschema").context("kubeschema binary")?;
    cmd.current_dir(workdir(world).as_str());
    if let Some(apis) = &world.apis_dir {
        cmd.arg("--apis-dir").arg(apis.as_str());
    }
    let output = cmd.args(args).output().context("run kubeschema")?;
    world.stdout = String::from_utf8(output.stdout).context("utf8 stdout")?;
    world.stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    world.exit_code = output.status.code();
    Ok(())
}

fn split_args(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

fn new_workdir(world: &mut KubeschemaWorld) -> Utf8PathBuf {
    let td = tempfile::tempdir().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).unwrap();
    world.temp = Some(td);
    world.workdir = Some(root.clone());
    root
}

// ============================================================================
// Catalogs
// ============================================================================

#[given("the fixture schema catalog")]
async fn fixture_catalog(world: &mut KubeschemaWorld) {
    new_workdir(world);
    world.apis_dir = Some(fixture_apis_dir());
}

#[given(expr = "a catalog with version {string} containing:")]
async fn custom_catalog(world: &mut KubeschemaWorld, version: String, step: &cucumber::gherkin::Step) {
    let root = new_workdir(world);
    let apis = root.join("apis");
    let version_dir = apis.join(&version);
    fs::create_dir_all(&version_dir).unwrap();

    let doc = step.docstring.as_deref().expect("docstring with swagger json");
    fs::write(version_dir.join("swagger.json"), doc).unwrap();
    world.apis_dir = Some(apis);
}

#[given(expr = "a config file selecting version {string}")]
async fn config_selecting_version(world: &mut KubeschemaWorld, version: String) {
    let root = workdir(world).clone();
    fs::write(
        root.join("kubeschema.toml"),
        format!("[catalog]\nversion = \"{}\"\n", version),
    )
    .unwrap();
}

// ============================================================================
// Commands
// ============================================================================

#[when(expr = "I run kubeschema {string}")]
async fn run_command(world: &mut KubeschemaWorld, line: String) {
    run(world, &split_args(&line)).unwrap();
}

// ============================================================================
// Assertions
// ============================================================================

#[then("the command succeeds")]
async fn command_succeeds(world: &mut KubeschemaWorld) {
    assert_eq!(
        world.exit_code,
        Some(0),
        "expected success, stderr: {}",
        world.stderr
    );
}

#[then(expr = "the command fails with {string}")]
async fn command_fails_with(world: &mut KubeschemaWorld, message: String) {
    assert_eq!(world.exit_code, Some(1), "stdout: {}", world.stdout);
    assert!(
        world.stderr.contains(&message),
        "expected {:?} in stderr: {}",
        message,
        world.stderr
    );
}

#[then(expr = "the output lists {string}")]
async fn output_lists(world: &mut KubeschemaWorld, name: String) {
    assert!(
        world.stdout.lines().any(|l| l.trim() == name),
        "expected line {:?} in:\n{}",
        name,
        world.stdout
    );
}

#[then(expr = "the output does not list {string}")]
async fn output_does_not_list(world: &mut KubeschemaWorld, name: String) {
    assert!(
        !world.stdout.lines().any(|l| l.trim() == name),
        "unexpected line {:?} in:\n{}",
        name,
        world.stdout
    );
}

#[then(expr = "the output contains {string}")]
async fn output_contains(world: &mut KubeschemaWorld, text: String) {
    assert!(
        world.stdout.contains(&text),
        "expected {:?} in:\n{}",
        text,
        world.stdout
    );
}

#[then(expr = "the output does not contain {string}")]
async fn output_does_not_contain(world: &mut KubeschemaWorld, text: String) {
    assert!(
        !world.stdout.contains(&text),
        "unexpected {:?} in:\n{}",
        text,
        world.stdout
    );
}

#[then(expr = "the JSON property path {string} has no children")]
async fn json_path_is_leaf(world: &mut KubeschemaWorld, path: String) {
    let node = json_property(world, &path);
    assert!(
        node.get("properties").is_none(),
        "expected {} to be a leaf: {}",
        path,
        node
    );
}

#[then(expr = "the JSON property path {string} has children")]
async fn json_path_has_children(world: &mut KubeschemaWorld, path: String) {
    let node = json_property(world, &path);
    assert!(
        node["properties"].as_array().is_some_and(|c| !c.is_empty()),
        "expected {} to be expanded: {}",
        path,
        node
    );
}

#[then(expr = "the JSON property path {string} references {string}")]
async fn json_path_references(world: &mut KubeschemaWorld, path: String, target: String) {
    let node = json_property(world, &path);
    assert_eq!(node["ref"], target.as_str());
}

/// Walk `a.b.c` through nested `properties` arrays of the resolved schema output.
fn json_property(world: &KubeschemaWorld, path: &str) -> serde_json::Value {
    let mut node: serde_json::Value =
        serde_json::from_str(&world.stdout).expect("show --format json output");
    for segment in path.split('.') {
        let children = node["properties"].as_array().cloned().unwrap_or_default();
        node = children
            .into_iter()
            .find(|c| c["name"] == segment)
            .unwrap_or_else(|| panic!("no property {:?} on path {:?}", segment, path));
    }
    node
}

#[tokio::main]
async fn main() {
    let features_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("features");
    KubeschemaWorld::cucumber().run(features_path).await;
}
