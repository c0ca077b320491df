mod hash_object_successfully;
