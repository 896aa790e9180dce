//! Integration tests for resloc

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    /// Command isolated from the user's config file
    fn resloc(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("resloc");
        cmd.env("RESLOC_CONFIG", temp.path().join("config.toml"));
        cmd
    }

    fn write_jar(path: &Path, files: &[(&str, &[u8])]) {
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, data) in files {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }

    fn jar_uri(path: &Path, entry: &str) -> String {
        format!("jar:{}!{}", url::Url::from_file_path(path).unwrap(), entry)
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        resloc(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("resource location toolkit"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        resloc(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("resloc"));
    }

    #[test]
    fn name_breaks_down_location() {
        let temp = TempDir::new().unwrap();
        resloc(&temp)
            .args(["name", "/opt/info/example.local.txt"])
            .assert()
            .success()
            .stdout(predicate::str::contains("basename: example.local.txt"))
            .stdout(predicate::str::contains("partial: example"))
            .stdout(predicate::str::contains("extensions: local, txt"))
            .stdout(predicate::str::contains("extension: txt"));
    }

    #[test]
    fn name_of_directory_skips_extensions() {
        let temp = TempDir::new().unwrap();
        resloc(&temp)
            .args(["name", "--directory", "/opt/info/"])
            .assert()
            .success()
            .stdout(predicate::str::contains("basename: info"))
            .stdout(predicate::str::contains("extension").not());
    }

    #[test]
    fn hash_native_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("abc.txt");
        fs::write(&file, b"abc").unwrap();

        resloc(&temp)
            .args(["hash", file.to_str().unwrap(), "--algorithm", "sha256"])
            .assert()
            .success()
            .stdout(predicate::str::contains(ABC_SHA256))
            .stdout(predicate::str::contains("SHA-256"));
    }

    #[test]
    fn hash_uses_configured_algorithm() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.toml"),
            "[digest]\nalgorithm = \"MD5\"\n",
        )
        .unwrap();
        let file = temp.path().join("empty.bin");
        fs::write(&file, b"").unwrap();

        resloc(&temp)
            .args(["hash", file.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("d41d8cd98f00b204e9800998ecf8427e"));
    }

    #[test]
    fn hash_archive_entry() {
        let temp = TempDir::new().unwrap();
        let jar = temp.path().join("bundle.jar");
        write_jar(&jar, &[("data/abc.txt", b"abc")]);

        resloc(&temp)
            .args(["hash", &jar_uri(&jar, "/data/abc.txt"), "-a", "SHA-256"])
            .assert()
            .success()
            .stdout(predicate::str::contains(ABC_SHA256));
    }

    #[test]
    fn hash_unknown_algorithm_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("abc.txt");
        fs::write(&file, b"abc").unwrap();

        resloc(&temp)
            .args(["hash", file.to_str().unwrap(), "-a", "SHA-999"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Digest algorithm not available"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn resolve_archive_entry_as_json() {
        let temp = TempDir::new().unwrap();
        let jar = temp.path().join("bundle.jar");
        write_jar(&jar, &[("data/abc.txt", b"abc")]);

        resloc(&temp)
            .args(["resolve", &jar_uri(&jar, "/data/abc.txt"), "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"kind\": \"archive\""))
            .stdout(predicate::str::contains("\"entry\": \"/data/abc.txt\""));
    }

    #[test]
    fn resolve_runtime_image_uri() {
        let temp = TempDir::new().unwrap();
        resloc(&temp)
            .args(["resolve", "jrt:/java.base/java/lang/Object.class"])
            .assert()
            .success()
            .stdout(predicate::str::contains("kind: runtime-image"))
            .stdout(predicate::str::contains("module: java.base"))
            .stdout(predicate::str::contains("resource: java/lang/Object.class"));
    }

    #[test]
    fn unsupported_scheme_fails() {
        let temp = TempDir::new().unwrap();
        resloc(&temp)
            .args(["resolve", "ftp://example.com/archive.jar"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unsupported scheme"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        resloc(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_init_then_show() {
        let temp = TempDir::new().unwrap();
        resloc(&temp)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration initialized"));
        assert!(temp.path().join("config.toml").exists());

        resloc(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[general]"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.toml"), "[general\n").unwrap();

        resloc(&temp)
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }
}
