pub const FIELD_BUILDER_STYLES: &str = r#"
/* ── Builder shell ── */
.field-builder {
    display: flex;
    flex-direction: column;
    gap: 1rem;
    max-width: 36rem;
    padding: 1.25rem;
    background: var(--window-bg, #1f2937);
    border: 1px solid var(--border-color, #374151);
    border-radius: 0.5rem;
    color: var(--text-primary, #f8fafc);
}

.field-builder-title {
    margin: 0;
    font-size: 1.125rem;
    font-weight: 600;
}

.field-row {
    display: grid;
    grid-template-columns: 9rem 1fr;
    align-items: start;
    gap: 0.75rem;
}

.field-row-label {
    padding-top: 0.4rem;
    font-size: 0.875rem;
    color: var(--text-secondary, #94a3b8);
}

.field-row-label[title] {
    cursor: help;
    text-decoration: underline dotted;
}

/* ── Inputs ── */
.field-text,
.field-select {
    width: 100%;
    padding: 0.4rem 0.6rem;
    background: var(--input-bg, #0f172a);
    color: var(--text-primary, #f8fafc);
    border: 1px solid var(--border-color, #374151);
    border-radius: 0.375rem;
    font-size: 0.875rem;
    box-sizing: border-box;
}

.field-text-wrap.has-overflow .field-text {
    border-color: var(--danger-bg, #ef4444);
}

.field-text-mirror {
    margin-top: 0.25rem;
    font-size: 0.75rem;
    color: var(--text-muted, #64748b);
    word-break: break-all;
    min-height: 1rem;
}

.field-text-overflow {
    color: var(--danger-bg, #ef4444);
    background: color-mix(in srgb, var(--danger-bg, #ef4444) 15%, transparent);
}

.field-readonly {
    padding-top: 0.4rem;
    font-size: 0.875rem;
}

.field-checkbox {
    margin-top: 0.55rem;
}

/* ── List ── */
.field-list {
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
}

.field-list-add {
    display: flex;
    align-items: flex-start;
    gap: 0.5rem;
}

.field-list-draft {
    flex: 1;
}

.field-list-items {
    list-style: none;
    margin: 0;
    padding: 0;
    max-height: 14rem;
    overflow-y: auto;
    border: 1px solid var(--border-color, #374151);
    border-radius: 0.375rem;
}

.field-list-item {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 0.3rem 0.6rem;
    font-size: 0.875rem;
}

.field-list-item + .field-list-item {
    border-top: 1px solid var(--border-color, #374151);
}

.field-list-remove {
    background: transparent;
    border: none;
    color: var(--text-secondary, #94a3b8);
    cursor: pointer;
}

.field-list-remove:hover {
    color: var(--danger-bg, #ef4444);
}

/* ── Actions ── */
.field-builder-actions {
    display: flex;
    gap: 0.5rem;
    justify-content: flex-end;
}

.field-button {
    padding: 0.375rem 0.875rem;
    border-radius: 0.375rem;
    font-size: 0.875rem;
    cursor: pointer;
    border: 1px solid var(--border-color, #374151);
    background: transparent;
    color: var(--text-secondary, #94a3b8);
}

.field-button--primary {
    background: var(--success-bg, #10b981);
    border-color: transparent;
    color: white;
}

.field-button:disabled {
    opacity: 0.5;
    cursor: not-allowed;
}

.field-builder-error {
    margin: 0;
    font-size: 0.875rem;
    color: var(--danger-bg, #ef4444);
}

.field-builder-status {
    font-size: 0.875rem;
    color: var(--text-secondary, #94a3b8);
}
"#;
