//! ハッシュルーティング

/// 画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Landing,
    Login,
    Signup,
    Report,
}

impl Route {
    /// `location.hash` から画面を決める（不明なパスはトップ）
    pub fn from_hash(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_start_matches('/');
        let path = path.split(['?', '/']).next().unwrap_or_default();
        match path {
            "login" => Route::Login,
            "signup" => Route::Signup,
            "report" => Route::Report,
            _ => Route::Landing,
        }
    }

    pub fn href(&self) -> &'static str {
        match self {
            Route::Landing => "#/",
            Route::Login => "#/login",
            Route::Signup => "#/signup",
            Route::Report => "#/report",
        }
    }

    /// ログイン済みならログイン/サインアップ画面からトップへ戻す
    pub fn redirect(&self, authenticated: bool) -> Option<Route> {
        match self {
            Route::Login | Route::Signup if authenticated => Some(Route::Landing),
            _ => None,
        }
    }
}

/// 現在の画面
pub fn current_route() -> Route {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .map(|hash| Route::from_hash(&hash))
        .unwrap_or_default()
}

/// 画面遷移
pub fn navigate(route: Route) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_hash(route.href());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hash() {
        assert_eq!(Route::from_hash(""), Route::Landing);
        assert_eq!(Route::from_hash("#/"), Route::Landing);
        assert_eq!(Route::from_hash("#/login"), Route::Login);
        assert_eq!(Route::from_hash("#signup"), Route::Signup);
        assert_eq!(Route::from_hash("#/report?x=1"), Route::Report);
        assert_eq!(Route::from_hash("#/privacy"), Route::Landing);
    }

    #[test]
    fn test_href_roundtrip() {
        for route in [Route::Landing, Route::Login, Route::Signup, Route::Report] {
            assert_eq!(Route::from_hash(route.href()), route);
        }
    }

    #[test]
    fn test_redirect_when_authenticated() {
        assert_eq!(Route::Login.redirect(true), Some(Route::Landing));
        assert_eq!(Route::Signup.redirect(true), Some(Route::Landing));
        assert_eq!(Route::Report.redirect(true), None);
        assert_eq!(Route::Login.redirect(false), None);
    }
}
