/// Per-request enrichment values captured by the host framework.
///
/// The caller builds this explicitly from its request state so the
/// forwarder never touches process globals.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    /// `_fbp` browser cookie, when the pixel script has set it.
    pub fbp: Option<String>,
    /// `_fbc` click-id cookie.
    pub fbc: Option<String>,
}

impl RequestContext {
    pub fn new(
        client_ip: Option<String>,
        user_agent: Option<String>,
        fbp: Option<String>,
        fbc: Option<String>,
    ) -> Self {
        Self {
            client_ip,
            user_agent,
            fbp,
            fbc,
        }
    }
}
