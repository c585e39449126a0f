use std::path::Path;

use sensible_merging_test_utils::Tester;

pub fn run_test(test_config_path: &Path) {
  let tester = Tester::from_config_path(test_config_path);
  let output = tester.run();
  let expected = &tester.config.expected;

  // If the test config has an expected error, assert that the error matches
  if let Some(expected_error) = &expected.error {
    let error = output
      .result
      .expect_err("Expected error but got success");
    assert_eq!(error.kind.code(), expected_error.code);
    assert_eq!(error.kind.to_string(), expected_error.message);
    return;
  }

  let stats = output.result.as_ref().unwrap();
  if let Some(merges) = expected.merges {
    assert_eq!(stats.changes, merges, "number of merges");
  }
  if let Some(chunks) = &expected.chunks {
    assert_eq!(&output.chunks(), chunks);
  }
  for (id, name) in &expected.names {
    let chunk = output
      .graph
      .chunk(&id.as_str().into())
      .unwrap_or_else(|| panic!("Chunk {id} is missing"));
    assert_eq!(chunk.name(), name.as_deref(), "name of chunk {id}");
  }
  assert_eq!(*tester.logs.lock().unwrap(), expected.logs);
}
