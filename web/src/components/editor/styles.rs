pub const EDITOR_STYLES: &str = r#"
/* ── Editor layout ── */
.editor-page {
    display: flex;
    flex-direction: column;
    gap: 0.75rem;
    max-width: 52rem;
    margin: 0 auto;
    padding: 1.5rem 1rem 3rem;
}

.editor-title-input {
    font-size: 1.5rem;
    font-weight: 600;
    padding: 0.5rem 0;
    border: none;
    border-bottom: 1px solid var(--border-color, #ddd);
    outline: none;
    background: transparent;
}

/* ── Toolbar ── */
.editor-toolbar {
    display: flex;
    flex-wrap: wrap;
    align-items: center;
    gap: 0.25rem;
    padding: 0.3rem 0;
    border-bottom: 1px solid var(--border-color, #ddd);
}

.editor-toolbar-btn {
    padding: 0.25rem 0.6rem;
    border: 1px solid transparent;
    border-radius: 0.25rem;
    background: transparent;
    cursor: pointer;
    font-size: 0.85rem;
}

.editor-toolbar-btn:hover { background: var(--hover-bg, #f1f1f1); }
.editor-toolbar-btn.active { border-color: var(--accent-bg, #6b5bd6); }

.editor-toolbar-spacer { flex: 1; }

/* ── Body ── */
.editor-textarea {
    min-height: 22rem;
    resize: vertical;
    padding: 0.75rem;
    font: inherit;
    line-height: 1.6;
    border: 1px solid var(--border-color, #ddd);
    border-radius: 0.25rem;
}

.editor-preview {
    min-height: 22rem;
    padding: 0.75rem;
    line-height: 1.6;
    border: 1px dashed var(--border-color, #ddd);
    border-radius: 0.25rem;
}

.editor-preview img { max-width: 100%; }

.editor-thumbnail {
    display: flex;
    align-items: center;
    gap: 0.75rem;
}

.editor-thumbnail img {
    width: 6rem;
    height: 6rem;
    object-fit: cover;
    border-radius: 0.25rem;
}

.editor-hashtag-input {
    padding: 0.5rem;
    border: 1px solid var(--border-color, #ddd);
    border-radius: 0.25rem;
}

/* ── Actions ── */
.editor-actions {
    display: flex;
    justify-content: flex-end;
    gap: 0.5rem;
}

.editor-action-btn {
    padding: 0.5rem 1.25rem;
    border: none;
    border-radius: 0.25rem;
    background: var(--accent-bg, #6b5bd6);
    color: #fff;
    cursor: pointer;
}

.editor-action-btn.secondary {
    background: transparent;
    color: inherit;
    border: 1px solid var(--border-color, #ddd);
}

.editor-action-btn:disabled { opacity: 0.5; cursor: default; }

.editor-status { font-size: 0.8rem; color: var(--text-secondary, #777); }
.editor-status--failed { color: var(--danger-bg, #c62828); }
"#;
