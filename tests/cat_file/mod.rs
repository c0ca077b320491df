mod cat_file_successfully;
