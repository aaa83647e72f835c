#[macro_export]
macro_rules! assert_ok {
  ($result:expr, $scanned:expr) => {
    match $result {
      | Ok((_, scanned)) => assert_eq!(scanned, $scanned),
      | Err(error) => panic!("{error:?}"),
    }
  };
}
