use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reducto::{RunRequest, SENTINEL, Worker, WorkerConfig};

fn wasm(text: &str) -> Vec<u8> {
    wat::parse_str(text).expect("valid wat")
}

fn returning(value: i32) -> Vec<u8> {
    wasm(&format!(
        r#"(module (func (export "main") (result i32) i32.const {value}))"#
    ))
}

const THROWING: &str = r#"
(module
  (import "env" "throw" (func $throw (param i32 i32)))
  (memory (export "memory") 1)
  (data (i32.const 0) "assertion failed: slot < len")
  (func (export "main") (result i32)
    (call $throw (i32.const 0) (i32.const 28))
    i32.const 0))
"#;

fn worker(threshold: usize) -> Worker {
    let config = WorkerConfig {
        recycle_threshold: threshold,
        env_prefixes: vec!["REDUCTO_TEST_UNUSED_".to_owned()],
        ..WorkerConfig::default()
    };
    Worker::new(&config).expect("worker")
}

fn request_line(debug: &[u8], release: &[u8]) -> String {
    format!(
        r#"{{"Debug":"{}","Release":"{}"}}"#,
        STANDARD.encode(debug),
        STANDARD.encode(release)
    )
}

fn serve(worker: &mut Worker, input: &str) -> String {
    let mut output = Vec::new();
    worker.serve(input.as_bytes(), &mut output).expect("serve");
    String::from_utf8(output).expect("utf-8 output")
}

#[test]
fn test_response_is_followed_by_sentinel() {
    let mut worker = worker(100);
    let line = request_line(&returning(7), &returning(7));

    let output = serve(&mut worker, &format!("{line}\n"));
    insta::assert_snapshot!(output, @r#"
    {"DebugOutput":7,"DebugError":null,"ReleaseOutput":7,"ReleaseError":null,"IsTimeout":false,"IsJitAssert":false,"HasCrashed":false,"EnvironmentVariables":{}}
    Done
    "#);
}

#[test]
fn test_release_assertion_sets_jit_assert() {
    let mut worker = worker(100);
    let line = request_line(&returning(3), &wasm(THROWING));

    let response = worker.handle_line(&line).expect("response");
    assert_eq!(response.debug_output, 3);
    assert_eq!(response.debug_error, None);
    assert_eq!(response.release_output, 0);
    assert_eq!(
        response.release_error.as_deref(),
        Some("assertion failed: slot < len")
    );
    assert!(response.is_jit_assert);
    assert!(!response.is_timeout);
    assert!(!response.has_crashed);
}

#[test]
fn test_invalid_module_is_reported_not_fatal() {
    let mut worker = worker(100);
    let line = request_line(b"\0asm garbage", &returning(1));

    let response = worker.handle_line(&line).expect("response");
    let error = response.debug_error.expect("debug error");
    assert!(error.starts_with("Invalid module"), "{error}");
    assert!(!response.is_jit_assert);
    assert_eq!(response.release_output, 1);
}

#[test]
fn test_malformed_lines_are_skipped() {
    let mut worker = worker(100);
    let good = request_line(&returning(5), &returning(6));
    let input = format!(
        "\n   \nnot json\n{{\"Debug\":\"!!\",\"Release\":\"\"}}\n{{\"Debug\":\"\"}}\n{good}\n"
    );

    let output = serve(&mut worker, &input);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2, "{output}");
    assert!(lines[0].contains(r#""DebugOutput":5"#));
    assert!(lines[0].contains(r#""ReleaseOutput":6"#));
    assert_eq!(lines[1], SENTINEL);
}

#[test]
fn test_last_line_without_newline_is_served() {
    let mut worker = worker(100);
    let line = request_line(&returning(2), &returning(2));

    let output = serve(&mut worker, &line);
    assert!(output.ends_with("\nDone\n"), "{output}");
}

#[test]
fn test_container_is_replaced_after_threshold() {
    let threshold = 2;
    let mut worker = worker(threshold);
    let line = request_line(&returning(1), &returning(1));

    let mut ids = Vec::new();
    for _ in 0..threshold + 2 {
        ids.push(worker.container_id());
        let response = worker.handle_line(&line).expect("response");
        assert_eq!(response.debug_output, 1);
    }

    assert!(ids[..=threshold].iter().all(|id| *id == ids[0]));
    assert_ne!(ids[threshold + 1], ids[0]);
}

#[test]
fn test_request_round_trips_through_json() {
    let request = RunRequest {
        debug: returning(1),
        release: Vec::new(),
    };
    let json = serde_json::to_string(&request).unwrap();
    assert!(json.contains(r#""Release":"""#));
    assert_eq!(serde_json::from_str::<RunRequest>(&json).unwrap(), request);
}
