#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Returns a command with TMDB and logging env vars cleared.
fn popmovies() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("popmovies");
    cmd.env_remove("TMDB_API_KEY")
        .env_remove("TMDB_BASE_URL")
        .env_remove("RUST_LOG")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .env("NO_COLOR", "1");
    cmd
}

/// Returns a base URL on a local port with nothing listening.
fn refused_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/3/")
}

#[test]
fn test_discover_help() {
    // Arrange & Act & Assert
    popmovies()
        .args(["discover", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--sort-by"));
}

#[test]
fn test_movie_missing_id() {
    // Arrange & Act & Assert
    popmovies()
        .args(["movie"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_discover_without_api_key_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    popmovies()
        .args(["discover", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB API key is not configured"));
}

#[test]
fn test_discover_unreachable_server_reports_no_movies() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    popmovies()
        .env("TMDB_API_KEY", "test-key")
        .env("TMDB_BASE_URL", refused_base_url())
        .args(["discover", "--sort-by", "popularity.desc", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No movies available"));
}

#[tokio::test]
async fn test_discover_renders_grid_with_absent_rows() {
    // Arrange
    let mock_server = MockServer::start().await;
    let json_body = include_str!("../../../fixtures/tmdb/discover_movie_popularity.json");

    Mock::given(method("GET"))
        .and(path("/3/discover/movie"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("sort_by", "vote_average.desc"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let base_url = format!("{}/3/", mock_server.uri());

    // Act
    let output = tokio::task::spawn_blocking(move || {
        popmovies()
            .env("TMDB_API_KEY", "test-key")
            .env("TMDB_BASE_URL", base_url)
            .args(["discover", "--sort-by", "vote_average.desc", "--dir"])
            .arg(dir.path())
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    // Assert
    assert!(output.status.success());
    // The log formatter may escape control characters in messages.
    let stdout = String::from_utf8(output.stdout)
        .unwrap()
        .replace("\\t", "\t");
    assert!(stdout.contains("#\tID\tRating\tReleaseDate\tTitle"));
    assert!(stdout.contains("1\t550\t8.4\t1999-10-15\tFight Club"));
    assert!(stdout.contains("2\t603\t8.2\t1999-03-30\tThe Matrix"));
    assert!(stdout.contains("3\t-\t-\t-\t-"));
    assert!(stdout.contains("4\t13\t8.5\t1994-06-23\tForrest Gump"));
    assert!(stdout.contains("5\t-\t-\t-\t-"));
    assert!(stdout.contains("Total: 3 movies (2 unavailable)"));
    assert!(!stdout.contains("test-key"));
}

#[test]
fn test_config_init_then_show() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    popmovies()
        .args(["config", "init", "--dir"])
        .arg(dir.path())
        .assert()
        .success();
    assert!(dir.path().join("config.toml").exists());

    popmovies()
        .args(["config", "show", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("popularity.desc"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "").unwrap();

    // Act & Assert
    popmovies()
        .args(["config", "init", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_show_masks_api_key() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    popmovies()
        .env("TMDB_API_KEY", "very-secret-key")
        .args(["config", "show", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("very-secret-key").not());
}
