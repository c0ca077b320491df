mod commit_with_nothing_to_commit_fails;
