use std::{
  backtrace::{Backtrace, BacktraceStatus},
  fmt::{self, Debug, Display},
};

/// Top-level error of the benchmark binary.
///
/// Its `Debug` output is what the process prints when `main` returns it, so it renders the
/// whole cause chain instead of the struct layout.
pub struct AppError {
  err: anyhow::Error,
}

impl AppError {
  pub fn new<E: Into<anyhow::Error>>(err: E) -> Self {
    Self { err: err.into() }
  }

  /// Get backtrace from anyhow (requires `RUST_BACKTRACE=1` to capture)
  pub fn backtrace(&self) -> &Backtrace {
    self.err.backtrace()
  }

  /// Innermost cause, e.g. to match on a library error.
  pub fn root_cause(&self) -> &(dyn std::error::Error + 'static) {
    self.err.root_cause()
  }
}

impl Debug for AppError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:#}", self.err)?;
    let bt = self.backtrace();
    if bt.status() == BacktraceStatus::Captured {
      write!(f, "\nBacktrace:\n{bt}")
    } else if cfg!(debug_assertions) {
      write!(f, "\n(hint: set RUST_BACKTRACE=1 to enable backtrace)")
    } else {
      Ok(())
    }
  }
}

impl Display for AppError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:#}", self.err)
  }
}

impl<E> From<E> for AppError
where
  E: Into<anyhow::Error>,
{
  fn from(err: E) -> Self {
    Self::new(err)
  }
}
