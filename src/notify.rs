/// Outcome of a mutating action, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Notice {
    Success(String),
    Failure(String),
}

pub(crate) trait Notifier {
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

/// Prints successes to stdout and failures to stderr.
pub(crate) struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match &notice {
            Notice::Success(m) => {
                tracing::info!(text = %m, "success notice");
                println!("{m}");
            }
            Notice::Failure(m) => {
                tracing::warn!(text = %m, "failure notice");
                eprintln!("{m}");
            }
        }
    }
}
