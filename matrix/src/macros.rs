/// Builds a [`Matrix`](crate::Matrix) from row literals separated by `;`.
///
/// Panics if the rows do not all have the same length, so it is meant for
/// tests and fixed literals.
#[macro_export]
macro_rules! matrix {
    ( $( $($val:expr),+ );* $(;)? ) => {
        match $crate::Matrix::from_rows(vec![$(vec![$($val),+]),*]) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    };
}
