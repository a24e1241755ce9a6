use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required field is missing or a form rule failed. The message is user-facing.
    #[error("{0}")]
    Validation(String),

    #[error("login rejected")]
    Authentication,

    #[error("registration rejected")]
    Registration,

    #[error("request failed: {message}")]
    Request { status: Option<u16>, message: String },

    #[error("no active session")]
    NotAuthenticated,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    /// Writing to the terminal failed, e.g. a closed pipe.
    #[error("output error: {0}")]
    Output(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub(crate) fn storage(e: impl ToString) -> Self {
        Error::Storage(e.to_string())
    }

    pub(crate) fn request(status: Option<u16>, message: impl Into<String>) -> Self {
        Error::Request { status, message: message.into() }
    }

    /// Static French copy shown to the user. Status codes are never surfaced.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            Error::Authentication => "Identifiants incorrects. Veuillez réessayer.".into(),
            Error::Registration => "Erreur lors de l'inscription. Veuillez réessayer.".into(),
            Error::Request { .. } => "Une erreur est survenue. Veuillez réessayer.".into(),
            Error::NotAuthenticated => "Veuillez vous connecter : applytrack login".into(),
            Error::Storage(_) => "Impossible d'enregistrer les paramètres locaux.".into(),
            Error::InvalidUrl(_) => "URL de l'API invalide.".into(),
            Error::Output(_) => "Impossible d'afficher le résultat.".into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::request(e.status().map(|s| s.as_u16()), e.to_string())
    }
}

// Only terminal writes propagate io errors with `?`; the store maps its own to `Storage`.
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Output(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failures_hide_status() {
        let e = Error::request(Some(404), "HTTP 404");
        let f = Error::request(Some(500), "HTTP 500");
        assert_eq!(e.user_message(), f.user_message());
        assert!(!e.user_message().contains("404"));
    }

    #[test]
    fn registration_and_login_failures_differ() {
        assert_eq!(Error::Registration.user_message(), "Erreur lors de l'inscription. Veuillez réessayer.");
        assert_ne!(Error::Registration.user_message(), Error::Authentication.user_message());
    }

    #[test]
    fn io_errors_are_output_failures() {
        let e: Error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(e, Error::Output(_)));
        assert_eq!(e.user_message(), "Impossible d'afficher le résultat.");
    }

    #[test]
    fn validation_message_passes_through() {
        let e = Error::validation("Le nom est requis.");
        assert_eq!(e.user_message(), "Le nom est requis.");
    }
}
