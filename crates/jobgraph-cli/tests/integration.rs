//! End-to-end tests driving the jobgraph binary over temp source trees.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn jobgraph(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jobgraph").expect("Failed to find jobgraph binary");
    // Isolate from the developer's real global config
    cmd.env("HOME", home).current_dir(home);
    cmd
}

fn write_file(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn sample_tree(dir: &Path) {
    write_file(
        dir,
        "app/jobs/ingest_job.rb",
        "module Harvest\n  class IngestJob < ApplicationJob\n  end\nend\n",
    );
    write_file(
        dir,
        "app/services/importer.rb",
        "module Harvest\n  class Importer\n    def call(work)\n      IngestJob.perform_later(work)\n    end\n  end\nend\n",
    );
}

#[test]
fn test_graph_renders_diagram_to_stdout() {
    let temp = TempDir::new().unwrap();
    sample_tree(temp.path());

    jobgraph(temp.path())
        .args(["--quiet", "graph", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("@startuml"))
        .stdout(predicate::str::contains(
            "(Harvest::Importer) --> (Harvest::IngestJob)",
        ))
        .stdout(predicate::str::contains("@enduml"));
}

#[test]
fn test_graph_writes_output_file() {
    let temp = TempDir::new().unwrap();
    sample_tree(temp.path());

    jobgraph(temp.path())
        .args(["--quiet", "graph", ".", "--output", "diagram.puml"])
        .assert()
        .success();

    let diagram = std::fs::read_to_string(temp.path().join("diagram.puml")).unwrap();
    assert!(diagram.starts_with("@startuml\n"));
    assert!(diagram.contains("(Harvest::Importer) --> (Harvest::IngestJob)"));
    assert!(diagram.ends_with("@enduml\n"));
}

#[test]
fn test_graph_filter_drops_unmatched_jobs() {
    let temp = TempDir::new().unwrap();
    sample_tree(temp.path());

    jobgraph(temp.path())
        .args(["--quiet", "graph", ".", "--filter", "Notify"])
        .assert()
        .success()
        .stdout(predicate::eq("@startuml\n@enduml\n"));
}

#[test]
fn test_graph_misaligned_namespaces_produce_empty_diagram() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "app/mixed.rb",
        "module A\n  class FooJob < BaseJob\n  end\nend\nclass Caller\n  def run\n    FooJob.perform\n  end\nend\n",
    );

    jobgraph(temp.path())
        .args(["--quiet", "graph", "."])
        .assert()
        .success()
        .stdout(predicate::eq("@startuml\n@enduml\n"));
}

#[test]
fn test_graph_missing_directory_fails() {
    let temp = TempDir::new().unwrap();

    jobgraph(temp.path())
        .args(["--quiet", "graph", "no/such/dir"])
        .assert()
        .failure();
}

#[test]
fn test_jobs_lists_sorted_declarations() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "app/jobs/zeta_job.rb",
        "class ZetaJob < ApplicationJob\nend\n",
    );
    write_file(
        temp.path(),
        "app/jobs/alpha_job.rb",
        "class AlphaJob < ApplicationJob\nend\n",
    );

    let output = jobgraph(temp.path())
        .args(["jobs", "."])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let alpha = stdout.find("AlphaJob").unwrap();
    let zeta = stdout.find("ZetaJob").unwrap();
    assert!(alpha < zeta);
}

#[test]
fn test_jobs_quiet_emits_json() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "app/jobs/alpha_job.rb",
        "class AlphaJob < ApplicationJob\nend\n",
    );

    let output = jobgraph(temp.path())
        .args(["--quiet", "jobs", "."])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let jobs: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(jobs[0]["name"], "AlphaJob");
    assert_eq!(jobs[0]["line"], 1);
}

#[test]
fn test_custom_suffix_from_cli() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        "app/workers/hard_worker.rb",
        "class HardWorker < BaseWorker\nend\nclass Dispatcher\n  def kick\n    HardWorker.perform_async\n  end\nend\n",
    );

    jobgraph(temp.path())
        .args(["--quiet", "--job-suffix", "Worker", "graph", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("(Dispatcher) --> (HardWorker)"));
}

#[test]
fn test_exclude_flag_removes_paths_from_scan() {
    let temp = TempDir::new().unwrap();
    sample_tree(temp.path());
    write_file(
        temp.path(),
        "engine/app/poker.rb",
        "module Harvest\n  class Poker\n    def poke\n      IngestJob.perform_now\n    end\n  end\nend\n",
    );

    jobgraph(temp.path())
        .args(["--quiet", "graph", ".", "--exclude", "**/engine/**"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Poker").not());
}

#[test]
fn test_config_init_and_show() {
    let temp = TempDir::new().unwrap();

    jobgraph(temp.path()).args(["config", "init"]).assert().success();
    assert!(temp.path().join(".jobgraph/config.toml").exists());

    jobgraph(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("job_suffix = \"Job\""));
}

#[test]
fn test_local_config_changes_scan_patterns() {
    let temp = TempDir::new().unwrap();
    write_file(
        temp.path(),
        ".jobgraph/config.toml",
        "[scan]\njob_suffix = \"Worker\"\ninvocation_method = \"perform_async\"\n",
    );
    write_file(
        temp.path(),
        "app/workers/hard_worker.rb",
        "class HardWorker < BaseWorker\nend\nclass Dispatcher\n  def kick\n    HardWorker.perform_async\n  end\nend\n",
    );

    jobgraph(temp.path())
        .args(["--quiet", "graph", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("(Dispatcher) --> (HardWorker)"));
}
