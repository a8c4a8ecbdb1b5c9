use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OpenSkyError {
    /// No bearer token could be obtained from the auth server.
    #[error("OpenSky authentication failed: {source}")]
    Auth {
        #[source]
        source: Box<OpenSkyError>,
    },
    #[error("OpenSky token endpoint returned an empty access_token")]
    EmptyToken,
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("OpenSky {endpoint} responded with status: {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
    #[error("OpenSky {endpoint} response parse failed: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl OpenSkyError {
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    pub(crate) fn auth(source: OpenSkyError) -> Self {
        Self::Auth {
            source: Box::new(source),
        }
    }
}
