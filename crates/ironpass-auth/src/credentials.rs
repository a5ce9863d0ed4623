//! Locating the raw session token on a request.

use axum::http::{HeaderMap, header::AUTHORIZATION};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const TOKEN_COOKIE: &str = "token";

const BEARER_PREFIX: &str = "Bearer ";

/// Returns the raw token presented by a request, if any.
///
/// An `Authorization: Bearer ...` header wins over the `token` cookie. A bearer
/// header with an empty token yields `None` without consulting the cookie.
pub fn extract_credential(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX));

    if let Some(token) = bearer {
        let token = token.trim();
        return (!token.is_empty()).then(|| token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Builds the HttpOnly session cookie handed out on login.
pub fn session_cookie(token: String, ttl_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(ttl_secs))
        .secure(secure)
        .build()
}

/// A cookie matching [`session_cookie`]'s name and path, for removal from a jar.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header::COOKIE};

    fn headers(pairs: &[(axum::http::HeaderName, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_no_credential() {
        assert_eq!(extract_credential(&HeaderMap::new()), None);
    }

    #[test]
    fn test_bearer_header() {
        let map = headers(&[(AUTHORIZATION, "Bearer abc.def.ghi")]);
        assert_eq!(extract_credential(&map), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_cookie_fallback() {
        let map = headers(&[(COOKIE, "theme=dark; token=from-cookie")]);
        assert_eq!(extract_credential(&map), Some("from-cookie".to_string()));
    }

    #[test]
    fn test_header_takes_precedence_over_cookie() {
        let map = headers(&[
            (AUTHORIZATION, "Bearer from-header"),
            (COOKIE, "token=from-cookie"),
        ]);
        assert_eq!(extract_credential(&map), Some("from-header".to_string()));
    }

    #[test]
    fn test_non_bearer_scheme_falls_back_to_cookie() {
        let map = headers(&[
            (AUTHORIZATION, "Basic dXNlcjpwYXNz"),
            (COOKIE, "token=from-cookie"),
        ]);
        assert_eq!(extract_credential(&map), Some("from-cookie".to_string()));

        let map = headers(&[(AUTHORIZATION, "bearer lowercase")]);
        assert_eq!(extract_credential(&map), None);
    }

    #[test]
    fn test_empty_bearer_does_not_fall_back() {
        let map = headers(&[(AUTHORIZATION, "Bearer  "), (COOKIE, "token=from-cookie")]);
        assert_eq!(extract_credential(&map), None);
    }

    #[test]
    fn test_empty_cookie_is_none() {
        let map = headers(&[(COOKIE, "token=")]);
        assert_eq!(extract_credential(&map), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc".to_string(), 604800, true);
        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604800)));
    }
}
