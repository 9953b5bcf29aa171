//! End-to-end tests driving the `recipe-cost` binary through stdin.

use std::io::Write;

use assert_cmd::Command;

fn recipe_cost() -> Command {
    let mut cmd = Command::cargo_bin("recipe-cost").unwrap();
    cmd.env_remove("RECIPE_COST_DENSITY_TABLE")
        .env_remove("RECIPE_COST_DEFAULT_RATE")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command, input: &str) -> String {
    let output = cmd.write_stdin(input).assert().success().get_output().clone();
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_flour_session() {
    let out = stdout_of(
        &mut recipe_cost(),
        "y\nBread\nflour\n3\ncups\ndone\n2.19\n5\npounds\n",
    );

    assert!(out.contains("Fantastic. I've added 3 cups of flour. to the recipe."));
    assert!(out.contains("Costs for recipe Bread:\nflour: $0.39\nTotal: $0.39\n"));
}

#[test]
fn test_unpriced_ingredient_is_reported() {
    let out = stdout_of(
        &mut recipe_cost(),
        "y\nToast\nbutter\n2\neach\nmilk\n1\ncup\ndone\n4\n1\npound\n4\n1\ngallon\n",
    );

    assert!(out.contains("butter: Cannot convert from 'cups' (volume) to 'each' (count)"));
    assert!(out.contains("Don't have price for butter\nmilk: $0.25\nTotal: $0.25"));
}

#[test]
fn test_declining() {
    let out = stdout_of(&mut recipe_cost(), "n\n");
    assert!(out.ends_with("OK. Maybe next time.\n"));
    assert!(!out.contains("Costs for recipe"));
}

#[test]
fn test_input_ending_early_fails() {
    let assert = recipe_cost().write_stdin("y\nBread\nflour\n").assert().failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Input ended before the interview was finished"));
}

#[test]
fn test_density_table_flag() {
    let mut table = tempfile::NamedTempFile::new().unwrap();
    write!(
        table,
        r#"{{ "rules": [ {{ "match": "contains", "pattern": "flour", "cups_per_pound": 4.0 }} ] }}"#
    )
    .unwrap();

    let out = stdout_of(
        recipe_cost().arg("--density-table").arg(table.path()),
        "y\nBread\nflour\n3\ncups\ndone\n2.19\n5\npounds\n",
    );
    // 5 pounds at 4 cups per pound is 20 cups, 3 of which cost $0.3285
    assert!(out.contains("flour: $0.33"));
}

#[test]
fn test_default_rate_from_env() {
    let out = stdout_of(
        recipe_cost().env("RECIPE_COST_DEFAULT_RATE", "3"),
        "y\nPilaf\nrice\n1\ncup\ndone\n6\n2\npounds\n",
    );
    // 2 pounds at 3 cups per pound is 6 cups, 1 of which costs $1.00
    assert!(out.contains("rice: $1.00"));
}

#[test]
fn test_invalid_default_rate() {
    let assert = recipe_cost()
        .arg("--default-rate")
        .arg("0")
        .write_stdin("y\n")
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Failed to set up density table"));
}
