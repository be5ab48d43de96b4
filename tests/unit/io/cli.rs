//! Tests for command-line parsing and batch file processing

#[cfg(test)]
mod tests {
    use ::image::{Rgba, RgbaImage};
    use clap::Parser;
    use quadtile::DecompositionError;
    use quadtile::algorithm::policy::DivisibilityPolicy;
    use quadtile::io::cli::{Cli, FileProcessor, PolicyKind};
    use quadtile::io::configuration::{
        DEFAULT_ERROR_THRESHOLD, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH,
    };
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn create_test_cli(args: &[&str]) -> Cli {
        let mut full = vec!["program"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    fn write_test_png(path: &Path) {
        let img = RgbaImage::from_fn(16, 12, |x, y| {
            if x < 9 && y < 5 {
                Rgba([220, 30, 30, 255])
            } else {
                Rgba([20, 40, (x * 10) as u8, 255])
            }
        });
        img.save(path).unwrap();
    }

    // Tests CLI parsing with only the required target argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = create_test_cli(&["test.png"]);

        assert_eq!(cli.target, PathBuf::from("test.png"));
        assert_eq!(cli.min_width, DEFAULT_MIN_WIDTH);
        assert_eq!(cli.min_height, DEFAULT_MIN_HEIGHT);
        assert!((cli.error_threshold - DEFAULT_ERROR_THRESHOLD).abs() < f64::EPSILON);
        assert_eq!(cli.policy, PolicyKind::Rms);
        assert!(!cli.quiet);
        assert!(!cli.preview);
        assert!(!cli.visualize);
        assert!(!cli.verify);
    }

    // Tests CLI parsing with all available arguments
    // Verified by renaming long flags
    #[test]
    fn test_cli_parse_all_args() {
        let cli = create_test_cli(&[
            "input.png",
            "--min-width",
            "3",
            "--min-height",
            "4",
            "--error-threshold",
            "2.5",
            "--policy",
            "uniform",
            "--quiet",
            "--no-skip",
            "--preview",
            "--visualize",
            "--verify",
        ]);

        assert_eq!(cli.min_width, 3);
        assert_eq!(cli.min_height, 4);
        assert!((cli.error_threshold - 2.5).abs() < f64::EPSILON);
        assert_eq!(cli.policy, PolicyKind::Uniform);
        assert!(cli.quiet);
        assert!(!cli.skip_existing());
        assert!(cli.preview && cli.visualize && cli.verify);
    }

    // Tests short flag parsing (-w, -H, -e, -q, -n, -p, -v)
    // Verified by changing short flag definitions
    #[test]
    fn test_cli_short_flags() {
        let cli = create_test_cli(&[
            "t.png", "-w", "2", "-H", "7", "-e", "0", "-q", "-n", "-p", "-v",
        ]);

        assert_eq!(cli.min_width, 2);
        assert_eq!(cli.min_height, 7);
        assert!(cli.error_threshold.abs() < f64::EPSILON);
        assert!(!cli.should_show_progress());
        assert!(!cli.skip_existing());
        assert!(cli.preview && cli.visualize);
    }

    // Tests configuration built from flags
    // Verified by ignoring the policy flag
    #[test]
    fn test_decomposition_config() {
        let rms = create_test_cli(&["t.png", "-e", "3"]).decomposition_config().unwrap();
        assert_eq!(
            rms.policy,
            DivisibilityPolicy::RmsThreshold {
                error_threshold: 3.0
            }
        );

        let uniform = create_test_cli(&["t.png", "--policy", "uniform"])
            .decomposition_config()
            .unwrap();
        assert_eq!(uniform.policy, DivisibilityPolicy::UniformColor);
    }

    // Tests invalid thresholds are rejected before any file is touched
    // Verified by clamping zero thresholds to one
    #[test]
    fn test_invalid_thresholds_fail_fast() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("a.png");
        write_test_png(&input);

        let mut processor =
            FileProcessor::new(create_test_cli(&[input.to_str().unwrap(), "-q", "-w", "0"]));
        assert!(matches!(
            processor.process(),
            Err(DecompositionError::InvalidParameter { .. })
        ));
        assert!(!FileProcessor::get_output_path(&input).exists());

        let negative = create_test_cli(&["t.png", "--error-threshold=-1"]);
        assert!(negative.decomposition_config().is_err());
    }

    // Tests error handling for missing targets
    // Verified by removing error return for nonexistent files
    #[test]
    fn test_process_nonexistent_file() {
        let mut processor = FileProcessor::new(create_test_cli(&["nonexistent.png", "-q"]));
        assert!(processor.process().is_err());
    }

    // Tests error handling for unsupported file types
    // Verified by removing file type validation
    #[test]
    fn test_process_invalid_file_type() {
        let temp_dir = TempDir::new().unwrap();
        let txt_file = temp_dir.path().join("test.txt");
        fs::write(&txt_file, "not an image").unwrap();

        let mut processor =
            FileProcessor::new(create_test_cli(&[txt_file.to_str().unwrap(), "-q"]));
        assert!(processor.process().is_err());
    }

    // Tests a single image produces an SVG plus optional preview and animation
    // Verified by skipping the preview export
    #[test]
    fn test_process_single_file_outputs() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("photo.png");
        write_test_png(&input);

        let mut processor = FileProcessor::new(create_test_cli(&[
            input.to_str().unwrap(),
            "-q",
            "--preview",
            "--visualize",
            "--verify",
        ]));
        processor.process().unwrap();

        let svg = fs::read_to_string(temp_dir.path().join("photo_quad.svg")).unwrap();
        assert!(svg.contains("viewBox=\"0 0 16 12\""));
        assert!(svg.contains("<rect"));
        assert!(temp_dir.path().join("photo_quad.png").exists());
        assert!(temp_dir.path().join("photo_visualization.gif").exists());
    }

    // Tests skip logic when output file exists
    // Verified by removing skip check
    #[test]
    fn test_skip_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("test.png");
        write_test_png(&input);
        let output = FileProcessor::get_output_path(&input);
        fs::write(&output, "sentinel").unwrap();

        let mut processor = FileProcessor::new(create_test_cli(&[input.to_str().unwrap(), "-q"]));
        processor.process().unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "sentinel");

        let mut forced =
            FileProcessor::new(create_test_cli(&[input.to_str().unwrap(), "-q", "--no-skip"]));
        forced.process().unwrap();
        assert_ne!(fs::read_to_string(&output).unwrap(), "sentinel");
    }

    // Tests directory processing ignores previews written by earlier runs
    // Verified by removing the own-output filter
    #[test]
    fn test_process_directory() {
        let temp_dir = TempDir::new().unwrap();
        write_test_png(&temp_dir.path().join("a.png"));
        write_test_png(&temp_dir.path().join("b.PNG"));
        write_test_png(&temp_dir.path().join("c_quad.png"));
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let mut processor =
            FileProcessor::new(create_test_cli(&[temp_dir.path().to_str().unwrap(), "-q"]));
        processor.process().unwrap();

        assert!(temp_dir.path().join("a_quad.svg").exists());
        assert!(temp_dir.path().join("b_quad.svg").exists());
        assert!(!temp_dir.path().join("c_quad_quad.svg").exists());
        assert!(!temp_dir.path().join("notes_quad.svg").exists());
    }

    // Tests repeated directory runs never decompose their own previews or animations
    // Verified by filtering only the SVG output suffix
    #[test]
    fn test_rerun_ignores_own_artifacts() {
        let temp_dir = TempDir::new().unwrap();
        write_test_png(&temp_dir.path().join("a.png"));
        let dir = temp_dir.path().to_str().unwrap();

        for _ in 0..2 {
            let mut processor =
                FileProcessor::new(create_test_cli(&[dir, "-q", "-v", "-p", "--no-skip"]));
            processor.process().unwrap();
        }

        assert!(temp_dir.path().join("a_quad.svg").exists());
        assert!(temp_dir.path().join("a_visualization.gif").exists());
        assert!(!temp_dir.path().join("a_visualization_quad.svg").exists());
        assert!(!temp_dir.path().join("a_quad_quad.svg").exists());

        let entries = fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 4);
    }

    // Tests undecodable files are logged and do not abort the batch
    // Verified by propagating per-file errors
    #[test]
    fn test_corrupt_file_is_logged_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("broken.png"), "fake png").unwrap();
        write_test_png(&temp_dir.path().join("good.png"));

        let mut processor =
            FileProcessor::new(create_test_cli(&[temp_dir.path().to_str().unwrap(), "-q"]));
        assert!(processor.process().is_ok());

        assert!(!temp_dir.path().join("broken_quad.svg").exists());
        assert!(temp_dir.path().join("good_quad.svg").exists());
    }

    // Tests processing empty directories
    // Verified by adding error for empty directories
    #[test]
    fn test_process_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut processor =
            FileProcessor::new(create_test_cli(&[temp_dir.path().to_str().unwrap(), "-q"]));
        assert!(processor.process().is_ok());
    }

    // Tests output path generation for every artifact
    // Verified by changing output suffix
    #[test]
    fn test_output_paths() {
        let input = Path::new("/data/in/cat.jpeg");
        assert_eq!(
            FileProcessor::get_output_path(input),
            PathBuf::from("/data/in/cat_quad.svg")
        );
        assert_eq!(
            FileProcessor::get_preview_path(input),
            PathBuf::from("/data/in/cat_quad.png")
        );
        assert_eq!(
            FileProcessor::get_visualization_path(input),
            PathBuf::from("/data/in/cat_visualization.gif")
        );
    }
}
