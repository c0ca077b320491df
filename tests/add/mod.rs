mod replace_file_with_directory_successfully;
