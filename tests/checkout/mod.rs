mod checkout_with_corrupt_object;
mod detach_head;
