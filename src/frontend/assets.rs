//! Embedded stylesheets.

/// Styles shared by every page.
pub const BASE_CSS: &str = r#"
* { box-sizing: border-box; }
body {
    margin: 0;
    font-family: "Inter", "Segoe UI", sans-serif;
    background: #f4f6fa;
    color: #1f2933;
}
h1, h2 { margin: 0 0 12px; font-weight: 600; }
.muted { color: #7b8794; }
.badge {
    display: inline-block;
    padding: 2px 8px;
    border-radius: 10px;
    background: #e0e8f9;
    color: #2d3a8c;
    font-size: 0.8rem;
}
"#;

/// Sidebar shell around the authenticated sections.
pub const SHELL_CSS: &str = r#"
.shell { display: flex; height: 100vh; }
.sidebar {
    width: 240px;
    display: flex;
    flex-direction: column;
    padding: 24px 16px;
    background: #1f2933;
    color: #f5f7fa;
}
.brand { font-size: 1.2rem; margin-bottom: 24px; }
.nav-link {
    display: block;
    padding: 8px 12px;
    border-radius: 6px;
    color: #cbd2d9;
    text-decoration: none;
}
.nav-link:hover { background: #323f4b; }
.nav-link.active { background: #3e4c59; color: #ffffff; }
.account { margin-top: auto; font-size: 0.9rem; }
.account button {
    margin-top: 8px;
    width: 100%;
    padding: 8px;
    border: none;
    border-radius: 6px;
    background: #52606d;
    color: #ffffff;
    cursor: pointer;
}
.content { flex: 1; padding: 32px; overflow-y: auto; }
"#;

/// Sign-in and public survey pages.
pub const AUTH_CSS: &str = r#"
.auth-container {
    display: flex;
    align-items: center;
    justify-content: center;
    height: 100vh;
    transition: opacity 0.3s ease;
}
.fade-in { opacity: 1; }
.fade-out { opacity: 0; }
.auth-card {
    width: 360px;
    padding: 32px;
    border-radius: 12px;
    background: #ffffff;
    box-shadow: 0 8px 24px rgba(31, 41, 51, 0.12);
}
.auth-card label { display: block; margin: 12px 0 4px; font-size: 0.9rem; }
.auth-card input {
    width: 100%;
    padding: 10px;
    border: 1px solid #cbd2d9;
    border-radius: 6px;
}
.auth-card button {
    width: 100%;
    margin-top: 20px;
    padding: 10px;
    border: none;
    border-radius: 6px;
    background: #3e4c59;
    color: #ffffff;
    cursor: pointer;
}
.auth-card button:disabled { opacity: 0.6; cursor: default; }
.error-message { margin-top: 12px; color: #cf1124; font-size: 0.9rem; }
.error-message-placeholder { height: 1.5em; }
"#;
