mod init_repository_successfully;
mod init_twice_fails;
mod run_command_outside_repository;
