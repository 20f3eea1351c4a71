use crate::DoxyWorld;
use cucumber::{given, then, when};
use doxy_issues::github::issues::{Issue, Label};
use std::io::Write;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OWNER: &str = "octocat";
const REPO: &str = "hello";

fn issues_path() -> String {
    format!("/repos/{OWNER}/{REPO}/issues")
}

fn output_path(world: &DoxyWorld) -> std::path::PathBuf {
    world
        .output_dir
        .as_ref()
        .expect("output directory not created")
        .path()
        .join("output.dox")
}

#[given(regex = r#"^issue #(\d+) "([^"]*)" at "([^"]*)" with body "([^"]*)"$"#)]
async fn given_issue_with_body(
    world: &mut DoxyWorld,
    number: u64,
    title: String,
    html_url: String,
    body: String,
) {
    world.issues.push(Issue {
        number,
        title,
        body: Some(body),
        html_url,
        labels: vec![],
    });
}

#[given(regex = r#"^issue #(\d+) "([^"]*)" at "([^"]*)" without body$"#)]
async fn given_issue_without_body(
    world: &mut DoxyWorld,
    number: u64,
    title: String,
    html_url: String,
) {
    world.issues.push(Issue {
        number,
        title,
        body: None,
        html_url,
        labels: vec![],
    });
}

#[given(regex = r#"^issue #(\d+) has the label "([^"]*)" at "([^"]*)"$"#)]
async fn given_issue_label(world: &mut DoxyWorld, number: u64, name: String, url: String) {
    let issue = world
        .issues
        .iter_mut()
        .find(|issue| issue.number == number)
        .unwrap_or_else(|| panic!("issue #{number} not defined"));
    issue.labels.push(Label { name, url });
}

#[given(regex = r#"^(\d+) numbered issues$"#)]
async fn given_numbered_issues(world: &mut DoxyWorld, count: u64) {
    for number in 1..=count {
        world.issues.push(Issue {
            number,
            title: format!("Issue {number}"),
            body: Some(format!("Body of issue {number}")),
            html_url: format!("https://github.com/{OWNER}/{REPO}/issues/{number}"),
            labels: vec![],
        });
    }
}

#[given(regex = r#"^the tracker serves (\d+) issues? per page$"#)]
async fn given_per_page(world: &mut DoxyWorld, per_page: usize) {
    world.per_page = Some(per_page);
}

#[given("the tracker rejects the token")]
async fn given_tracker_rejects_token(world: &mut DoxyWorld) {
    world.reject_token = true;
}

#[when(regex = r#"^I export the "(open|closed|all)" issues$"#)]
async fn when_export_issues(world: &mut DoxyWorld, state: String) {
    let server = MockServer::start().await;

    if world.reject_token {
        Mock::given(method("GET"))
            .and(path(issues_path()))
            .respond_with(ResponseTemplate::new(401).set_body_string("Bad credentials"))
            .mount(&server)
            .await;
    } else {
        let per_page = world.per_page.unwrap_or(world.issues.len().max(1));
        let mut pages: Vec<&[Issue]> = world.issues.chunks(per_page).collect();
        pages.push(&[]);
        for (index, page) in pages.iter().enumerate() {
            Mock::given(method("GET"))
                .and(path(issues_path()))
                .and(query_param("state", state.as_str()))
                .and(query_param("page", (index + 1).to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(page))
                .mount(&server)
                .await;
        }
    }

    let output_dir = tempfile::tempdir().expect("Failed to create output directory");
    world.output_dir = Some(output_dir);
    let output_path = output_path(world);
    let api_url = server.uri();

    let argv: Vec<String> = [
        "doxy-issues",
        "--user",
        OWNER,
        "--repo",
        REPO,
        "--state",
        state.as_str(),
        "--output_path",
        output_path.to_str().expect("non UTF-8 temp path"),
        "--api-url",
        api_url.as_str(),
        "--token",
        "test-token",
    ]
    .iter()
    .map(|arg| arg.to_string())
    .collect();
    let args = doxy_issues::cli::parser::parse_args(&argv).expect("Invalid test arguments");

    let mut captured = Vec::new();
    let result = {
        let writer: Option<&mut dyn Write> = Some(&mut captured);
        doxy_issues::run::run(args, writer).await
    };

    world.captured_output = captured;
    world.run_result = Some(result);
    world.document = std::fs::read_to_string(&output_path).unwrap_or_default();
    world.request_count = server
        .received_requests()
        .await
        .map_or(0, |requests| requests.len());
}

#[then("the export should succeed")]
async fn then_export_succeeds(world: &mut DoxyWorld) {
    match &world.run_result {
        Some(Ok(())) => {}
        other => panic!("Expected a successful export, got {other:?}"),
    }
}

#[then(regex = r#"^the export should fail with "([^"]*)"$"#)]
async fn then_export_fails(world: &mut DoxyWorld, expected: String) {
    match &world.run_result {
        Some(Err(err)) => assert!(
            format!("{err:#}").contains(&expected),
            "Expected error containing '{expected}', got '{err:#}'"
        ),
        other => panic!("Expected a failed export, got {other:?}"),
    }
}

#[then("no output file should be written")]
async fn then_no_output_file(world: &mut DoxyWorld) {
    assert!(!output_path(world).exists());
}

#[then(regex = r#"^the page should start with the requirements page directive$"#)]
async fn then_page_starts_with_directive(world: &mut DoxyWorld) {
    assert!(
        world
            .document
            .starts_with("/*! \\page requirements Requirements\n\n"),
        "Unexpected page start:\n{}",
        world.document
    );
    assert!(world.document.ends_with("\n*/\n"));
}

#[then(regex = r#"^the page should contain the line "(.*)"$"#)]
async fn then_page_contains_line(world: &mut DoxyWorld, expected: String) {
    assert!(
        world.document.lines().any(|line| line == expected),
        "Line '{expected}' not found in:\n---\n{}\n---",
        world.document
    );
}

#[then(regex = r#"^a body row should read "(.*)"$"#)]
async fn then_body_row_reads(world: &mut DoxyWorld, expected: String) {
    let found = world.document.lines().any(|line| {
        line.strip_prefix("    | ")
            .and_then(|row| row.strip_suffix(" |"))
            .is_some_and(|row| row.trim_end() == expected)
    });
    assert!(
        found,
        "No body row reading '{expected}' in:\n---\n{}\n---",
        world.document
    );
}

#[then("every separator row should be as wide as its header row")]
async fn then_separator_rows_match(world: &mut DoxyWorld) {
    let separator = regex::Regex::new(r"^    \|-+-\|$").expect("valid regex");
    let lines: Vec<&str> = world.document.lines().collect();
    let mut separators = 0;
    for (index, line) in lines.iter().enumerate() {
        if separator.is_match(line) {
            separators += 1;
            let header = lines[index - 1];
            assert_eq!(
                header.chars().count(),
                line.chars().count(),
                "Header '{header}' and separator '{line}' differ in width"
            );
        }
    }
    assert!(separators > 0, "No separator rows found");
}

#[then(regex = r#"^the page should list (\d+) requirements?$"#)]
async fn then_page_lists_requirements(world: &mut DoxyWorld, count: usize) {
    let requirements = world
        .document
        .lines()
        .filter(|line| line.starts_with("    | [requirement "))
        .count();
    assert_eq!(requirements, count);
}

#[then(regex = r#"^the requirements should appear in the order (.*)$"#)]
async fn then_requirements_in_order(world: &mut DoxyWorld, order: String) {
    let expected: Vec<String> = order
        .split(", ")
        .map(|number| format!("[requirement {}]", number.trim_start_matches('#')))
        .collect();
    let found: Vec<String> = world
        .document
        .lines()
        .filter_map(|line| line.strip_prefix("    | "))
        .filter(|line| line.starts_with("[requirement "))
        .filter_map(|line| line.split_once(']').map(|(head, _)| format!("{head}]")))
        .collect();
    assert_eq!(found, expected);
}

#[then(regex = r#"^the footer should define "\[([^\]]*)\]" as "([^"]*)"$"#)]
async fn then_footer_defines(world: &mut DoxyWorld, key: String, url: String) {
    let definition = format!("[{key}]: {url}");
    assert!(
        world.document.lines().any(|line| line == definition),
        "Definition '{definition}' not found in:\n---\n{}\n---",
        world.document
    );
}

#[then(regex = r#"^the footer should not define "\[([^\]]*)\]" as "([^"]*)"$"#)]
async fn then_footer_does_not_define(world: &mut DoxyWorld, key: String, url: String) {
    let definition = format!("[{key}]: {url}");
    assert!(!world.document.lines().any(|line| line == definition));
}

#[then(regex = r#"^(\d+) requests? should have been made$"#)]
async fn then_request_count(world: &mut DoxyWorld, count: usize) {
    assert_eq!(world.request_count, count);
}

#[then(regex = r#"^the output should contain "(.*)"$"#)]
async fn then_output_contains(world: &mut DoxyWorld, expected: String) {
    let output = String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8");
    assert!(
        output.contains(&expected),
        "Expected output to contain '{expected}', got:\n---\n{output}\n---"
    );
}
