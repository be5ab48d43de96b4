//! Tests for progress tracking across batch runs

#[cfg(test)]
mod tests {
    use quadtile::io::progress::ProgressManager;
    use std::path::Path;

    // Tests a full single-file lifecycle without a file counter
    // Verified by creating the batch bar for single files
    #[test]
    fn test_single_file_lifecycle() {
        let mut pm = ProgressManager::new();
        pm.initialize(1);
        pm.start_file(Path::new("test.png"), 100);
        pm.update_coverage(40);
        pm.update_coverage(100);
        pm.complete_file();
        pm.finish();
    }

    // Tests default trait implementation and empty runs
    // Verified by initializing bars eagerly
    #[test]
    fn test_progress_manager_default() {
        let mut pm = ProgressManager::default();
        pm.initialize(0);
        pm.finish();
    }

    // Tests consecutive files replace the pixel bar, including failures
    // Verified by keeping the previous bar after a new start
    #[test]
    fn test_multiple_files_with_failures() {
        let mut pm = ProgressManager::new();
        pm.initialize(6);

        for i in 0..6 {
            pm.start_file(Path::new(&format!("file{i}.png")), 10);
            pm.update_coverage(5);
            if i % 3 == 0 {
                pm.fail_file();
            } else {
                pm.complete_file();
            }
        }

        pm.finish();
    }

    // Tests failures before a file starts and updates after it closes are tolerated
    // Verified by marking the previous file as failed
    #[test]
    fn test_updates_without_active_file() {
        let mut pm = ProgressManager::new();
        pm.initialize(2);
        pm.fail_file();
        pm.update_coverage(10);

        pm.start_file(Path::new("b.png"), 4);
        pm.complete_file();
        pm.update_coverage(2);
        pm.fail_file();
        pm.finish();
    }
}
