mod write_tree_from_index;
