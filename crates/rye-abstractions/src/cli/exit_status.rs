/// Exit status code used as a result of the listing process.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExitStatus(pub(crate) i32);

impl ExitStatus {
    /// Everything was listed.
    pub const OK: Self = Self(0);

    /// The arguments were invalid or the discovered test cases conflicted.
    pub const FAILED: Self = Self(101);

    /// Return the raw exit code.
    #[inline]
    pub fn code(self) -> i32 {
        self.0
    }

    /// Return whether this is a successful status.
    #[inline]
    pub fn success(self) -> bool {
        self == Self::OK
    }

    /// Terminate the process with the exit code.
    ///
    /// This method **should not** be called before the cleanup
    /// of the process has completed.
    #[inline]
    pub fn exit(self) -> ! {
        std::process::exit(self.code());
    }
}
