/* tests/server_tests.rs */

use wikkid::{FileType, MemoryFileStore, Page, Server, WikiError};

fn make_server(content: &[(&str, Option<&str>)]) -> Server<MemoryFileStore> {
	Server::new(MemoryFileStore::with_content(content.iter().copied()))
}

#[test]
fn test_missing_resource() -> Result<(), WikiError> {
	let server = make_server(&[]);
	let info = server.get_info("/a-file")?;
	assert_eq!(info.status, FileType::Missing);
	assert_eq!(info.path, "a-file");
	assert!(info.resource.is_none());
	Ok(())
}

#[test]
fn test_text_file() -> Result<(), WikiError> {
	let server = make_server(&[("readme.txt", Some("A readme file."))]);
	let info = server.get_info("/readme.txt")?;
	assert_eq!(info.status, FileType::TextFile);
	assert_eq!(info.path, "readme.txt");
	assert_eq!(info.mimetype, Some("text/plain"));
	assert!(info.resource.is_some());
	Ok(())
}

#[test]
fn test_get_info_does_not_infer_suffix() -> Result<(), WikiError> {
	let server = make_server(&[("readme.txt", Some("A readme file."))]);
	let info = server.get_info("/readme")?;
	assert_eq!(info.status, FileType::Missing);
	Ok(())
}

#[test]
fn test_get_page_directory() -> Result<(), WikiError> {
	let server = make_server(&[("some-dir/", None)]);
	let page = server.get_page("/some-dir")?;
	assert!(matches!(page, Page::DirectoryListing(_)));
	Ok(())
}

#[test]
fn test_get_page_source_file() -> Result<(), WikiError> {
	let server = make_server(&[("test.cpp", Some("// Some source"))]);
	let page = server.get_page("/test.cpp")?;
	assert!(matches!(page, Page::OtherText(_)));
	Ok(())
}

#[test]
fn test_get_page_wiki_page() -> Result<(), WikiError> {
	let server = make_server(&[("a-wiki-page.txt", Some("Doesn't need caps."))]);
	let page = server.get_page("/a-wiki-page.txt")?;
	assert!(matches!(page, Page::Wiki(_)));
	Ok(())
}

#[test]
fn test_suffixed_and_unsuffixed_share_a_backing_file() -> Result<(), WikiError> {
	let server = make_server(&[("a-wiki-page.txt", Some("Doesn't need caps."))]);
	let with_suffix = server.get_page("/a-wiki-page.txt")?;
	let without_suffix = server.get_page("/a-wiki-page")?;
	assert!(matches!(with_suffix, Page::Wiki(_)));
	assert!(matches!(without_suffix, Page::Wiki(_)));
	assert_eq!(with_suffix.resource(), without_suffix.resource());
	assert_eq!(with_suffix.title(), without_suffix.title());
	Ok(())
}

#[test]
fn test_get_page_missing_page() -> Result<(), WikiError> {
	let server = make_server(&[]);
	let page = server.get_page("/Missing")?;
	assert!(matches!(page, Page::Missing(_)));
	assert_eq!(page.path(), "/Missing");
	assert_eq!(page.write_filename(), "Missing.txt");
	Ok(())
}

#[test]
fn test_get_page_wiki_no_suffix() -> Result<(), WikiError> {
	let server = make_server(&[("WikiPage.txt", Some("Works with caps too."))]);
	let page = server.get_page("/WikiPage")?;
	assert!(matches!(page, Page::Wiki(_)));
	Ok(())
}

#[test]
fn test_get_page_wiki_with_matching_dir() -> Result<(), WikiError> {
	let server = make_server(&[
		("WikiPage.txt", Some("Works with caps too.")),
		("WikiPage/SubPage.txt", Some("A sub page.")),
	]);
	let page = server.get_page("/WikiPage")?;
	assert!(matches!(page, Page::Wiki(_)));
	assert_eq!(page.path(), "/WikiPage");
	assert_eq!(page.resource().map(|r| r.path.as_str()), Some("WikiPage.txt"));

	let sub = server.get_page("/WikiPage/SubPage")?;
	assert!(matches!(sub, Page::Wiki(_)));
	Ok(())
}

#[test]
fn test_get_page_directory_without_wiki_page() -> Result<(), WikiError> {
	let server = make_server(&[("WikiPage/SubPage.txt", Some("A sub page."))]);
	let Page::DirectoryListing(listing) = server.get_page("/WikiPage")? else {
		panic!("expected a directory listing");
	};
	assert_eq!(listing.path, "/WikiPage");
	assert_eq!(listing.entries.len(), 1);
	assert_eq!(listing.entries[0].path, "WikiPage/SubPage.txt");
	assert_eq!(listing.entries[0].file_type, FileType::TextFile);
	Ok(())
}

#[test]
fn test_get_page_wiki_in_subdir() -> Result<(), WikiError> {
	let server = make_server(&[("WikiPage/SubPage.txt", Some("A sub page."))]);
	let page = server.get_page("/WikiPage/SubPage")?;
	assert!(matches!(page, Page::Wiki(_)));
	Ok(())
}

#[test]
fn test_get_page_root_path_no_front_page() -> Result<(), WikiError> {
	let server = make_server(&[]);
	let page = server.get_page("/")?;
	assert!(matches!(page, Page::Missing(_)));
	assert_eq!(page.path(), "/FrontPage");
	assert_eq!(page.write_filename(), "FrontPage.txt");
	Ok(())
}

#[test]
fn test_get_page_root_file_exists() -> Result<(), WikiError> {
	let server = make_server(&[("FrontPage.txt", Some("The first page."))]);
	let page = server.get_page("/")?;
	assert!(matches!(page, Page::Wiki(_)));
	assert_eq!(page.path(), "/FrontPage");
	assert_eq!(page.resource().map(|r| r.path.as_str()), Some("FrontPage.txt"));
	Ok(())
}

#[test]
fn test_get_page_binary_file() -> Result<(), WikiError> {
	let server = make_server(&[("image.png", Some("An image."))]);
	let page = server.get_page("/image.png")?;
	assert!(matches!(page, Page::Binary(_)));
	assert_eq!(server.get_info("/image.png")?.status, FileType::BinaryFile);
	Ok(())
}

#[test]
fn test_lookups_are_idempotent() -> Result<(), WikiError> {
	let server = make_server(&[
		("FrontPage.txt", Some("The first page.")),
		("docs/Guide.txt", Some("guide")),
		("docs/logo.png", Some("png")),
	]);
	for path in ["/", "/docs", "/docs/Guide", "/docs/logo.png", "/Nothing"] {
		assert_eq!(server.get_page(path)?, server.get_page(path)?);
		assert_eq!(server.get_info(path)?, server.get_info(path)?);
	}
	Ok(())
}

#[test]
fn test_page_content_is_readable() -> Result<(), WikiError> {
	let server = make_server(&[("FrontPage.txt", Some("The first page."))]);
	let page = server.get_page("/")?;
	assert_eq!(server.read_page_bytes(&page)?, Some(b"The first page.".to_vec()));
	let missing = server.get_page("/Other")?;
	assert_eq!(server.read_page_bytes(&missing)?, None);
	Ok(())
}

#[test]
fn test_parent_traversal_is_rejected() {
	let server = make_server(&[("FrontPage.txt", Some("The first page."))]);
	assert!(matches!(server.get_page("/../etc/passwd"), Err(WikiError::InvalidPath)));
	assert!(matches!(server.get_info("/a/../../x"), Err(WikiError::InvalidPath)));
}
