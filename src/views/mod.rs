mod gallery;
mod header;
